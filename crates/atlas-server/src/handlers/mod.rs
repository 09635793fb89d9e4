//! HTTP request handlers.

pub(crate) mod breadcrumbs;
pub(crate) mod catalog;
pub(crate) mod navigation;
pub(crate) mod subjects;
