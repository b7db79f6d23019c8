mod config;
mod detector;
mod harness;
