#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// Core domain models for the product catalog.
///
/// These are plain data structures with minimal behavior, kept apart from
/// their persistence and transport so that either can be swapped out.
pub mod models;

/// Interface traits for the product catalog.
///
/// This module contains the "ports" in the hexagonal architecture pattern:
/// the contract between the domain and the adapters (databases, HTTP servers)
/// that sit around it.
pub mod ports;
