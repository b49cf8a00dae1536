//! Shared CLI argument types

use clap::Args;

use crate::client::PaginationParams;

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per entry (global default)
    #[default]
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}

/// Shared pagination arguments for list commands.
///
/// Flatten this into any command that supports pagination:
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Maximum results per page
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Page number (1-indexed)
    #[arg(long, short = 'p')]
    pub page: Option<usize>,
}

impl PaginationArgs {
    /// Convert CLI args to API pagination params, falling back to the
    /// configured page size when no limit is given.
    pub fn to_params(&self, default_page_size: usize) -> PaginationParams {
        let mut params = PaginationParams::new().page_size(self.limit.unwrap_or(default_page_size));

        if let Some(page) = self.page {
            params = params.page(page);
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_params_uses_default_page_size() {
        let args = PaginationArgs::default();
        let params = args.to_params(50);

        assert_eq!(params.page_size, Some(50));
        assert!(params.page.is_none());
    }

    #[test]
    fn test_to_params_explicit_limit_wins() {
        let args = PaginationArgs {
            limit: Some(5),
            page: Some(2),
        };
        let params = args.to_params(50);

        assert_eq!(params.page_size, Some(5));
        assert_eq!(params.page, Some(2));
    }
}
