pub mod cli;
pub mod compose;
pub mod context;
pub mod error;
pub mod folder;
pub mod html;
pub mod locator;
pub mod model;
pub mod names;
pub mod nav;
pub mod output;
pub mod page;
pub mod parsers;
pub mod report;
pub mod summary;
