//! Pagination metadata for a window over a collection: current page, page
//! count, the run of page numbers a pager should show, and navigation.

pub mod config;
pub mod error;
pub mod pagination;

pub use error::PaginationError;
pub use pagination::{
    Pagination, PaginationOptions, PaginationSnapshot, DEFAULT_MAXIMUM_PAGES_TO_DISPLAY,
};
