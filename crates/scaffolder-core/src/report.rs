//! Final success and failure messages

use crate::product::ProductConfig;
use crate::style::TerminalFormatter;

/// Header printed above any error that ends the run
pub const ERROR_HEADER: &str = "An error occurred while creating the project:";

/// "Next steps" block shown after a successful run
pub fn render_next_steps<C: ProductConfig>(
    config: &C,
    fmt: &dyn TerminalFormatter,
    project_name: &str,
) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&format!(
        "  {} Created {}\n",
        fmt.success("Success!"),
        project_name
    ));
    out.push('\n');
    out.push_str(&format!("  {}\n", fmt.heading("Next steps")));
    out.push('\n');

    for (i, step) in config.next_steps(project_name).iter().enumerate() {
        out.push_str(&format!("  {}.  {}\n", i + 1, fmt.command(step)));
    }

    out.push('\n');
    out.push_str(&format!(
        "  {} {}\n",
        fmt.dim("Documentation:"),
        fmt.link(config.docs_url())
    ));

    out
}

/// Error block for a failed run; the cause chain is included when `verbose`
pub fn render_error(fmt: &dyn TerminalFormatter, err: &anyhow::Error, verbose: bool) -> String {
    let mut out = format!("{}\n  {}\n", fmt.error(ERROR_HEADER), err);

    if verbose {
        out.push('\n');
        out.push_str(&fmt.dim(&format!("{:?}", err)));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::testing::TestProduct;
    use crate::style::PlainFormatter;

    #[test]
    fn test_next_steps_are_numbered() {
        let out = render_next_steps(&TestProduct, &PlainFormatter, "my-app");

        assert!(out.contains("Created my-app"));
        assert!(out.contains("1.  cd my-app"));
        assert!(out.contains("https://example.com/docs"));
    }

    #[test]
    fn test_error_hides_chain_unless_verbose() {
        let err = anyhow::anyhow!("disk full").context("Template dosyaları kopyalanamadı");

        let quiet = render_error(&PlainFormatter, &err, false);
        assert!(quiet.starts_with(ERROR_HEADER));
        assert!(quiet.contains("Template dosyaları kopyalanamadı"));
        assert!(!quiet.contains("disk full"));

        let verbose = render_error(&PlainFormatter, &err, true);
        assert!(verbose.contains("Caused by"));
        assert!(verbose.contains("disk full"));
    }
}
