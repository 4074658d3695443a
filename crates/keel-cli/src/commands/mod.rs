pub mod ask;
pub mod compare;
pub mod dispatch;
pub mod samples;
pub mod schema;
pub mod score;
pub mod search;
pub mod shared;
pub mod summary;
pub mod top;
