use core::fmt;

use crate::{RankedEntry, RankedReport};

const READY_HEADER: &str = "READY: NO UNRESOLVED EXTERNAL DEPENDENCIES";
const RANKED_HEADER: &str = "SORTED BY NUMBER OF DEPENDENCIES";
const LEAVES_HEADER: &str = "NO PARENT AND NO REMAINING DEPENDENCIES";

impl RankedReport {
    /// Renders the report as text.
    ///
    /// The output only depends on the report, so analyzing the same source twice renders the
    /// same bytes.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RankedReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_section(f, READY_HEADER, self.ready())?;
        write_section(f, RANKED_HEADER, self.ranked().iter())?;
        if self.config().with_leaves {
            write_section(f, LEAVES_HEADER, self.leaves())?;
        }
        Ok(())
    }
}

fn write_section<'a, I>(f: &mut fmt::Formatter, header: &str, entries: I) -> fmt::Result
where
    I: Iterator<Item = &'a RankedEntry>,
{
    writeln!(f, "\n{header}")?;
    for entry in entries {
        writeln!(f, "\t{entry}")?;
    }
    Ok(())
}

impl fmt::Display for RankedEntry {
    /// Formats as `Name [ A,B ]`, listing the closure in expansion order
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [ ", self.declaration.name)?;
        for (i, dependency) in self.closure.total.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{dependency}")?;
        }
        if !self.closure.is_empty() {
            f.write_str(" ")?;
        }
        f.write_str("]")
    }
}
