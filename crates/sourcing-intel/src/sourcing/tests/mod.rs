mod common;

mod pricing;
mod service;
