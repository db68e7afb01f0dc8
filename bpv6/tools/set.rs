use super::*;
use hardy_bpv6::prelude::*;

/// A `field=value` assignment.
#[derive(Debug, Clone)]
pub struct Assignment {
    field: Field,
    value: u32,
}

impl std::str::FromStr for Assignment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected 'field=value', got '{s}'"))?;
        Ok(Self {
            field: field.trim().parse()?,
            value: value.trim().parse()?,
        })
    }
}

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
pub struct Command {
    /// Path to the bundle to update, use '-' for stdin
    input: io::Input,

    /// Path to the location to write the bundle to, or stdout if not supplied
    #[arg(short, long, default_value = "")]
    output: io::Output,

    /// Field assignments, such as 'src-node=42', applied in order
    #[arg(short, long = "field", value_name = "FIELD=VALUE")]
    fields: Vec<Assignment>,

    /// Fields to return to their unset state, applied after the assignments
    #[arg(short, long, value_delimiter = ',')]
    clear: Vec<Field>,

    /// Replace the payload with the contents of this file, '-' for stdin
    #[arg(short, long)]
    payload: Option<io::Input>,
}

impl Command {
    pub fn exec(self) -> anyhow::Result<()> {
        let data = self.input.read_all()?;
        let mut bundle = Bundle::parse(data)
            .map_err(|e| anyhow::anyhow!("{}: Failed to parse bundle: {e}", self.input))?;

        for Assignment { field, value } in &self.fields {
            bundle
                .set(*field, *value)
                .map_err(|e| anyhow::anyhow!("Failed to set {field} to {value}: {e}"))?;
        }
        for field in &self.clear {
            bundle
                .clear(*field)
                .map_err(|e| anyhow::anyhow!("Failed to clear {field}: {e}"))?;
        }
        if let Some(payload) = &self.payload {
            bundle
                .set_payload(&payload.read_all()?)
                .map_err(|e| anyhow::anyhow!("Failed to replace payload: {e}"))?;
        }

        let data = bundle
            .serialize()
            .map_err(|e| anyhow::anyhow!("Failed to encode bundle: {e}"))?;
        info!("Updated bundle is {} bytes", data.len());
        self.output.write_all(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments() {
        let a: Assignment = "time-stamp-seq-nr = 42".parse().unwrap();
        assert_eq!((a.field, a.value), (Field::TimeStampSeqNr, 42));
        assert!("src-node".parse::<Assignment>().is_err());
        assert!("nowhere=1".parse::<Assignment>().is_err());
        assert!("src-node=-1".parse::<Assignment>().is_err());
    }
}
