mod dday;
pub use dday::Dday;

mod month;
pub use month::MonthAnniversaries;

mod connectivity;
pub use connectivity::{TestMessage, UserList};
