//! nodekit-lib: provisioning and build tasks for Node.js front-end assets
//!
//! This crate provides the pieces behind the `nodekit` CLI:
//! - `InstallNode`: fetch a Node.js distribution into a project-local directory
//! - `NpmInstall`: install dependencies with the bundled npm
//! - `Gulp`: run gulp tasks with the project's gulp install
//! - `Build`: chain all of the above and a downstream build command

pub mod config;
pub mod consts;
pub mod dist;
pub mod extract;
pub mod fetch;
pub mod platform;
pub mod process;
pub mod task;
pub mod util;
