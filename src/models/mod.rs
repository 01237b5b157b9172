mod detail;
mod position;

pub use detail::{parse_record_date, Detail, DividendRecord, Sector, StockDetail};
pub use position::{InstrumentType, Position};
