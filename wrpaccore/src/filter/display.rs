use std::fmt::{Display, Formatter, Result};
use super::Filter;

fn join(f: &mut Formatter<'_>, parts: &[Filter], op: &str) -> Result {
    f.write_str("(")?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            write!(f, " {op} ")?;
        }
        write!(f, "{part}")?;
    }
    f.write_str(")")
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Filter::All => f.write_str("TRUE"),
            Filter::Nothing => f.write_str("FALSE"),
            Filter::Eq { attribute, value } =>
                write!(f, "{attribute} = {value:?}"),
            Filter::Related { relationship, actor } =>
                write!(f, "{relationship}({actor:?})"),
            Filter::And(parts) => join(f, parts, "AND"),
            Filter::Or(parts) => join(f, parts, "OR"),
        }
    }
}
