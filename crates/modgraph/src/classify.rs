//! Import specifier classification.
//!
//! Every specifier lands in exactly one [`SpecifierKind`]. Order of the
//! checks matters: relative paths are local before anything else, and
//! builtins win over a declared package with the same name.

use crate::manifest::ExternalPackages;
use crate::types::SpecifierKind;

/// Namespace prefix reserved for platform modules (`node:fs`).
const BUILTIN_PREFIX: &str = "node:";

/// Node.js builtin module names, including subpath modules.
const NODE_BUILTINS: &[&str] = &[
    "_http_agent",
    "_http_client",
    "_http_common",
    "_http_incoming",
    "_http_outgoing",
    "_http_server",
    "_stream_duplex",
    "_stream_passthrough",
    "_stream_readable",
    "_stream_transform",
    "_stream_wrap",
    "_stream_writable",
    "_tls_common",
    "_tls_wrap",
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "inspector/promises",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Classify a raw import specifier.
#[must_use]
pub fn classify(specifier: &str, packages: &ExternalPackages) -> SpecifierKind {
    if is_relative(specifier) {
        SpecifierKind::Local
    } else if is_builtin(specifier) {
        SpecifierKind::Builtin
    } else if packages.contains(specifier) || packages.contains(package_name(specifier)) {
        SpecifierKind::External
    } else {
        SpecifierKind::Unknown
    }
}

/// Whether the specifier is a relative path (`./x`, `../x`, `.`, `..`).
///
/// Absolute paths and bare names are never local.
#[must_use]
pub fn is_relative(specifier: &str) -> bool {
    specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier == "."
        || specifier == ".."
}

/// Whether the specifier names a platform builtin module.
#[must_use]
pub fn is_builtin(specifier: &str) -> bool {
    specifier.starts_with(BUILTIN_PREFIX) || NODE_BUILTINS.contains(&specifier)
}

/// Package name addressed by a bare specifier.
///
/// `lodash/fp` addresses `lodash`; `@scope/pkg/sub` addresses `@scope/pkg`.
#[must_use]
pub fn package_name(specifier: &str) -> &str {
    let segments = if specifier.starts_with('@') { 2 } else { 1 };
    match specifier.match_indices('/').nth(segments - 1) {
        Some((idx, _)) => &specifier[..idx],
        None => specifier,
    }
}
