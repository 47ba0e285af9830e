/// Quote records and TXT/CSV loading.
pub mod quotes;
