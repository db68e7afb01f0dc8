use super::*;
use hardy_bpv6::prelude::*;

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
pub struct Command {
    /// Emit JSON instead of a table
    #[arg(short, long)]
    json: bool,

    /// The list of bundle files to inspect, '-' to use stdin.
    files: Vec<io::Input>,
}

#[derive(serde::Serialize)]
struct FieldView {
    field: Field,
    offset: usize,
    width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<u32>,
}

#[derive(serde::Serialize)]
struct BundleView<'a> {
    file: String,
    len: usize,
    flags: BundleFlags,
    block_flags: BlockFlags,
    fields: Vec<FieldView>,
    #[serde(skip)]
    payload: &'a [u8],
}

impl<'a> BundleView<'a> {
    fn new(file: String, bundle: &'a Bundle<&'a [u8]>) -> anyhow::Result<Self> {
        let fields = bundle
            .offsets()
            .iter()
            .map(|(field, extent)| FieldView {
                field,
                offset: extent.offset,
                width: extent.width,
                value: bundle.get(field).ok(),
            })
            .collect();

        Ok(Self {
            file,
            len: bundle.len(),
            flags: bundle.flags()?,
            block_flags: bundle.block_flags()?,
            fields,
            payload: bundle.payload()?,
        })
    }

    fn print(&self) {
        println!("{}: {} bytes", self.file, self.len);
        println!("  {:<18} {:>6} {:>6}  value", "field", "offset", "width");
        for f in &self.fields {
            let value = match (f.field, f.value) {
                (Field::Payload, _) => format!("{:02x?}", self.payload),
                (_, _) if f.width == 0 => "-".into(),
                (_, Some(value)) => value.to_string(),
                (_, None) => "invalid".into(),
            };
            println!(
                "  {:<18} {:>6} {:>6}  {value}",
                f.field, f.offset, f.width
            );
        }
        println!("  {:?}", self.flags);
        println!("  {:?}", self.block_flags);
    }
}

impl Command {
    pub fn exec(self) -> anyhow::Result<()> {
        if self.files.is_empty() {
            return Err(anyhow::anyhow!("No files to inspect"));
        }

        let mut views = Vec::new();
        let mut count_failed: usize = 0;
        for input in &self.files {
            let data = input.read_all()?;
            let bundle = match Bundle::parse(data.as_slice()) {
                Ok(bundle) => bundle,
                Err(e) => {
                    eprintln!("{input}: Failed to parse bundle: {e}");
                    count_failed = count_failed.saturating_add(1);
                    continue;
                }
            };

            let view = BundleView::new(input.to_string(), &bundle)?;
            if self.json {
                views.push(serde_json::to_value(&view)?);
            } else {
                view.print();
            }
        }

        if self.json {
            println!("{}", serde_json::to_string_pretty(&views)?);
        }

        (count_failed == 0)
            .then_some(())
            .ok_or(anyhow::anyhow!("{count_failed} files failed to parse"))
    }
}
