//! Defaults shared by the library and the CLI.

/// Project configuration file looked up in the base directory.
pub const CONFIG_FILENAME: &str = "nodekit.toml";

/// Product prefix of every Node.js distribution archive.
pub const PRODUCT: &str = "node";

pub const DEFAULT_NODE_VERSION: &str = "v12.14.1";
pub const DEFAULT_DIST_URL: &str = "https://nodejs.org/dist/";

pub const DEFAULT_NODE_DIR: &str = "node";
pub const DEFAULT_NODE_MODULES_DIR: &str = "node_modules";
pub const DEFAULT_CACHE_DIR: &str = "cache";

pub const DEFAULT_GULP_TASK: &str = "default";

/// Makes npm run lifecycle scripts with the managed `node` first on PATH.
pub const SCRIPTS_PREPEND_NODE_PATH: &str = "--scripts-prepend-node-path";
