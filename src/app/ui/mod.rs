mod panels;

pub(in crate::app) use panels::{show_empty, show_error, show_loading};
