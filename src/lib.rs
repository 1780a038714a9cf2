//! Dice Tray library
//!
//! The 3D tray, its interaction controller and result evaluation live in
//! [`dice3d`]. The binary only parses the command line and builds the app.

pub mod dice3d;
