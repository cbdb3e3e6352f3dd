//! Indented tree view of a dependency graph.

use super::DependencyGraph;

const HEADER: &str = "Dependency Graph:";
const BRANCH: &str = "  ├── ";
const LAST_BRANCH: &str = "  └── ";
const NO_DEPENDENCIES: &str = "(no dependencies)";

/// Render every module with its direct dependencies, in mapping order.
///
/// ```text
/// Dependency Graph:
///
/// src/index.ts
///   ├── src/a.ts
///   └── src/b.ts
///
/// src/a.ts
///   └── (no dependencies)
///
/// ```
#[must_use]
pub fn render_text(graph: &DependencyGraph) -> String {
    let mut out = format!("{HEADER}\n\n");

    for (module, deps) in graph {
        out.push_str(module);
        out.push('\n');
        match deps.split_last() {
            None => push_line(&mut out, LAST_BRANCH, NO_DEPENDENCIES),
            Some((last, rest)) => {
                for dep in rest {
                    push_line(&mut out, BRANCH, dep);
                }
                push_line(&mut out, LAST_BRANCH, last);
            }
        }
        out.push('\n');
    }

    out
}

fn push_line(out: &mut String, prefix: &str, text: &str) {
    out.push_str(prefix);
    out.push_str(text);
    out.push('\n');
}
