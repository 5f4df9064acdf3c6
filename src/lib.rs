pub mod api;
pub mod ledger;
pub mod pow;
pub mod worker;
