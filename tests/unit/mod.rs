mod distribution;
mod export;
mod filters;
mod saved_views;
mod summary;
