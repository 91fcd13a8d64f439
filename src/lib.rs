//! Family trip itinerary: a five-day schedule that can be viewed, edited,
//! printed and exported, persisted between sessions in a local key-value
//! store.

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod parser;
pub mod schedule;
pub mod storage;
pub mod web;
