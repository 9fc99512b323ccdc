#[macro_use]
mod macros;

agg_mod![db, models, reasons, utils];
