use clap::Subcommand;

/// Schedule commands.
///
/// Numeric inputs stay optional and signed so that out-of-range values reach
/// request validation and come back as an error envelope.
#[derive(Clone, Debug, Subcommand)]
pub enum ScheduleCommands {
    /// List schedules, one page at a time.
    List {
        /// Page number (values below 1 mean the first page)
        #[arg(long, allow_negative_numbers = true)]
        page: Option<i64>,
        /// Page size, at most 100 (defaults to general.default_page_size)
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
        /// Only schedules on this UTC day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Get a schedule with its tasks.
    Get { id: String },
    /// Start a visit (check in).
    Start {
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        latitude: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        longitude: Option<f64>,
    },
    /// End a visit (check out).
    End {
        id: String,
        #[arg(long, allow_negative_numbers = true)]
        latitude: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        longitude: Option<f64>,
    },
    /// Overwrite a schedule's status.
    SetStatus { id: String, status: String },
}
