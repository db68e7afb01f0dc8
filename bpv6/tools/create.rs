use super::*;
use clap::ValueEnum;
use hardy_bpv6::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ArgFlags {
    /// Specify ADU is an administrative record
    #[value(name = "isadm")]
    IsAdminRecord,

    /// Require bundle to not be fragmented
    #[value(name = "nofrag")]
    DoNotFragment,

    /// Request custody transfer
    #[value(name = "custody")]
    CustodyRequested,

    /// Destination is a singleton endpoint
    #[value(name = "singleton")]
    Singleton,

    /// Request acknowledgement by application
    #[value(name = "ack")]
    AppAckRequested,

    /// Request reception status reports
    #[value(name = "rcv")]
    ReceiptReportRequested,

    /// Request custody acceptance status reports
    #[value(name = "cst")]
    CustodyReportRequested,

    /// Request forwarding status reports
    #[value(name = "fwd")]
    ForwardReportRequested,

    /// Request delivery status reports
    #[value(name = "dlv")]
    DeliveryReportRequested,

    /// Request deletion status reports
    #[value(name = "del")]
    DeleteReportRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ArgPriority {
    Bulk,
    Normal,
    Expedited,
}

fn to_bundle_flags(args: &[ArgFlags], priority: Option<ArgPriority>) -> Option<BundleFlags> {
    if args.is_empty() && priority.is_none() {
        return None;
    }

    let mut flags = BundleFlags {
        priority: match priority {
            None | Some(ArgPriority::Bulk) => Priority::Bulk,
            Some(ArgPriority::Normal) => Priority::Normal,
            Some(ArgPriority::Expedited) => Priority::Expedited,
        },
        ..Default::default()
    };
    for arg in args {
        match arg {
            ArgFlags::IsAdminRecord => flags.is_admin_record = true,
            ArgFlags::DoNotFragment => flags.do_not_fragment = true,
            ArgFlags::CustodyRequested => flags.custody_requested = true,
            ArgFlags::Singleton => flags.singleton = true,
            ArgFlags::AppAckRequested => flags.app_ack_requested = true,
            ArgFlags::ReceiptReportRequested => flags.receipt_report_requested = true,
            ArgFlags::CustodyReportRequested => flags.custody_report_requested = true,
            ArgFlags::ForwardReportRequested => flags.forward_report_requested = true,
            ArgFlags::DeliveryReportRequested => flags.delivery_report_requested = true,
            ArgFlags::DeleteReportRequested => flags.delete_report_requested = true,
        }
    }
    Some(flags)
}

/// A compressed endpoint, written as `node.service` with an optional `ipn:`
/// prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    node: u32,
    service: u32,
}

impl std::str::FromStr for Endpoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (node, service) = s
            .strip_prefix("ipn:")
            .unwrap_or(s)
            .split_once('.')
            .ok_or_else(|| anyhow::anyhow!("Expected 'node.service', got '{s}'"))?;
        Ok(Self {
            node: node.parse()?,
            service: service.parse()?,
        })
    }
}

#[derive(Parser, Debug)]
#[command(about, long_about = None)]
pub struct Command {
    /// The source endpoint of the bundle, as 'node.service'
    #[arg(short, long)]
    source: Endpoint,

    /// The destination endpoint of the bundle, as 'node.service'
    #[arg(short, long)]
    destination: Endpoint,

    /// The optional 'Report To' endpoint of the bundle
    #[arg(short, long = "report-to")]
    report_to: Option<Endpoint>,

    /// The optional current custodian of the bundle
    #[arg(short, long)]
    custodian: Option<Endpoint>,

    /// Path to the location of the file to use as payload, use '-' for stdin
    #[arg(short, long)]
    payload: io::Input,

    /// Path to the location to write the bundle to, or stdout if not supplied
    #[arg(short, long, default_value = "")]
    output: io::Output,

    /// One or more bundle processing control flags, separated by ','
    #[arg(short, long, value_delimiter = ',')]
    flags: Vec<ArgFlags>,

    #[arg(long)]
    priority: Option<ArgPriority>,

    /// Creation timestamp, in seconds
    #[arg(short, long, default_value_t = 0)]
    timestamp: u32,

    /// Creation timestamp sequence number
    #[arg(short = 'n', long, default_value_t = 0)]
    sequence: u32,

    /// Lifetime of the bundle in seconds
    #[arg(short, long, default_value_t = 3600)]
    lifetime: u32,

    /// Mark the bundle as a fragment starting at this offset
    #[arg(long = "fragment-offset", requires = "app_data_len")]
    fragment_offset: Option<u32>,

    /// Total length of the application data unit the fragment belongs to
    #[arg(long = "app-data-len", requires = "fragment_offset")]
    app_data_len: Option<u32>,
}

impl Command {
    pub fn exec(self) -> anyhow::Result<()> {
        let mut builder = Builder::new();
        builder
            .source(self.source.node, self.source.service)
            .destination(self.destination.node, self.destination.service)
            .timestamp(self.timestamp, self.sequence)
            .lifetime(self.lifetime);

        if let Some(flags) = to_bundle_flags(&self.flags, self.priority) {
            builder.flags(flags);
        }
        if let Some(report_to) = self.report_to {
            builder.report_to(report_to.node, report_to.service);
        }
        if let Some(custodian) = self.custodian {
            builder.custodian(custodian.node, custodian.service);
        }
        if let (Some(offset), Some(len)) = (self.fragment_offset, self.app_data_len) {
            builder.fragment(offset, len);
        }

        let payload = self.payload.read_all()?;
        let mut bundle = builder
            .build(&payload)
            .map_err(|e| anyhow::anyhow!("Failed to build bundle: {e}"))?;

        let data = bundle
            .serialize()
            .map_err(|e| anyhow::anyhow!("Failed to encode bundle: {e}"))?;
        info!("Created {} byte bundle", data.len());
        self.output.write_all(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        assert_eq!(
            "ipn:12.3".parse::<Endpoint>().unwrap(),
            Endpoint {
                node: 12,
                service: 3
            }
        );
        assert_eq!("7.0".parse::<Endpoint>().unwrap().node, 7);
        assert!("7".parse::<Endpoint>().is_err());
        assert!("dtn://node/svc".parse::<Endpoint>().is_err());
    }

    #[test]
    fn flags() {
        assert!(to_bundle_flags(&[], None).is_none());

        let flags = to_bundle_flags(
            &[ArgFlags::CustodyRequested, ArgFlags::DeliveryReportRequested],
            Some(ArgPriority::Expedited),
        )
        .unwrap();
        assert!(flags.custody_requested && flags.delivery_report_requested);
        assert_eq!(u32::from(flags), (1 << 3) | (2 << 7) | (1 << 17));
    }
}
