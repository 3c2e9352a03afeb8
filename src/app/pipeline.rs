//! Shared startup logic used by both the CLI and TUI front-ends.
//!
//! Resolve the source -> fetch once -> parse into the immutable table ->
//! wrap in the `AppContext` every handler reads from.

use std::time::Instant;

use tracing::{error, info};

use crate::dashboard::AppContext;
use crate::data::{DataSource, SalesTable};
use crate::error::AppError;

/// Load the sales table from `source`. Any failure here is fatal.
pub fn load_context(source: DataSource) -> Result<AppContext, AppError> {
    let started = Instant::now();
    info!(%source, "loading sales data");

    let table = source
        .fetch()
        .and_then(|bytes| SalesTable::from_csv_bytes(&bytes))
        .inspect_err(|err| error!(%source, %err, "failed to load sales data"))?;

    let load_time = started.elapsed();
    let stats = table.stats();
    info!(
        rows = stats.rows,
        recession_rows = stats.recession_rows,
        year_min = stats.year_min,
        year_max = stats.year_max,
        elapsed_ms = load_time.as_millis() as u64,
        "sales data loaded"
    );

    Ok(AppContext::new(table, source, load_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_local_csv_into_context() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(
            tmp,
            "Year,Month,Recession,Vehicle_Type,Automobile_Sales,Advertising_Expenditure,unemployment_rate\n\
             1980,Jan,1,Sports,10,20,5.0\n"
        )
        .unwrap();

        let ctx = load_context(DataSource::File(tmp.path().to_path_buf())).unwrap();
        assert_eq!(ctx.table.len(), 1);
        assert_eq!(ctx.source, DataSource::File(tmp.path().to_path_buf()));
    }

    #[test]
    fn malformed_csv_fails_startup() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "Year,Month\n1980,Jan\n").unwrap();
        let err = load_context(DataSource::File(tmp.path().to_path_buf())).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_DATA);
    }
}
