//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in emoface-core:
//!
//! - Touch pad (digital capacitive touch module, either polarity)
//! - Climate sensor (DHT11, bit-banged over a single open-drain pin)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod sensor;
pub mod touch;
