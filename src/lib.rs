pub mod capability;
pub mod config;
pub mod contact;
pub mod content;
pub mod counter;
pub mod log;
pub mod page;
pub mod pointer;
pub mod progress_bar;
pub mod scheduler;
pub mod scroll;
pub mod signal;
pub mod theme;
pub mod typewriter;
pub mod visibility;

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(target_arch = "wasm32")]
pub mod frontend;
