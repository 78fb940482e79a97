use super::*;

mod active_nav;
mod back_to_top;
mod mobile_nav;
mod search_filter;
mod smooth_scroll;
