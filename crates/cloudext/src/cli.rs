//! Clap derive structures for the `cloudext` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cloudext -- extension services for OpenStack-compatible clouds
#[derive(Debug, Parser)]
#[command(
    name = "cloudext",
    version,
    about = "Manage cloud extension services from the command line",
    long_about = "Manage API Gateway, dedicated load balancers, NAT gateways and\n\
        ModelArts training jobs on an OpenStack-compatible public cloud.\n\n\
        Service endpoints and API versions are resolved from the identity\n\
        catalog; see `cloudext endpoints` for what each service bound to.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Cloud profile to use
    #[arg(long, short = 'p', env = "CLOUDEXT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Identity endpoint (overrides profile)
    #[arg(long, env = "CLOUDEXT_AUTH_URL", global = true)]
    pub auth_url: Option<String>,

    /// Region (overrides profile)
    #[arg(long, short = 'r', env = "CLOUDEXT_REGION", global = true)]
    pub region: Option<String>,

    /// Project ID (overrides profile)
    #[arg(long, env = "CLOUDEXT_PROJECT_ID", global = true)]
    pub project_id: Option<String>,

    /// Pre-issued token; switches the profile to token auth
    #[arg(long, env = "CLOUDEXT_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CLOUDEXT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "CLOUDEXT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "CLOUDEXT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Services known to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceArg {
    Apig,
    Vlb,
    Nat,
    Modelarts,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage API Gateway instances, groups, APIs and policies
    #[command(alias = "apig")]
    Apigw(ApigwArgs),

    /// Manage dedicated load balancers, listeners, pools and members
    #[command(alias = "vlb")]
    Lb(LbArgs),

    /// Manage NAT gateways and SNAT/DNAT rules
    Nat(NatArgs),

    /// Manage ModelArts training jobs
    #[command(alias = "ma")]
    Modelarts(ModelartsArgs),

    /// Show how each service endpoint and API version resolved
    #[command(alias = "ep")]
    Endpoints(EndpointsArgs),

    /// Send a request through a service's resolved client
    Raw(RawArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Shared filtering arguments for all list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Query filter passed to the API (repeatable)
    /// Examples: "status=ACTIVE", "name=edge"
    #[arg(long, short = 'f', value_name = "KEY=VALUE")]
    pub filter: Vec<String>,
}

/// The API Gateway instance a command operates in.
#[derive(Debug, Args)]
pub struct GatewayScope {
    /// API Gateway instance ID
    #[arg(long, short = 'g', env = "CLOUDEXT_APIG_GATEWAY")]
    pub gateway: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  API GATEWAY
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ApigwArgs {
    #[command(subcommand)]
    pub command: ApigwCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApigwCommand {
    /// List gateway instances
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a gateway instance
    Show {
        /// Gateway instance ID
        id: String,
    },

    /// Delete a gateway instance
    #[command(alias = "rm")]
    Delete {
        /// Gateway instance ID
        id: String,
    },

    /// API groups
    Group(ApigGroupArgs),

    /// APIs and their publication
    Api(ApigApiArgs),

    /// Environments
    Env(ApigEnvArgs),

    /// Signature keys and their bindings
    #[command(alias = "sig")]
    Signature(ApigSignatureArgs),

    /// Throttling policies and their bindings
    Throttle(ApigThrottleArgs),

    /// Access control policies
    Acl(ApigAclArgs),

    /// VPC channels (load balance channels)
    Channel(ApigChannelArgs),
}

// ── Groups ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApigGroupArgs {
    #[command(flatten)]
    pub scope: GatewayScope,

    #[command(subcommand)]
    pub command: ApigGroupCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApigGroupCommand {
    /// List API groups
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show an API group
    Show {
        /// Group ID or name
        group: String,
    },

    /// Create an API group
    Create {
        /// Group name
        #[arg(long)]
        name: String,

        /// Description
        #[arg(long)]
        remark: Option<String>,
    },

    /// Update an API group
    Set {
        /// Group ID or name
        group: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        remark: Option<String>,
    },

    /// Delete an API group
    #[command(alias = "rm")]
    Delete {
        /// Group ID or name
        group: String,
    },
}

// ── APIs ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApigApiArgs {
    #[command(flatten)]
    pub scope: GatewayScope,

    #[command(subcommand)]
    pub command: ApigApiCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApigApiCommand {
    /// List APIs
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show an API
    Show {
        /// API ID
        id: String,
    },

    /// Create an API with an HTTP backend
    Create {
        /// Read the full request body from a JSON file
        #[arg(long, conflicts_with_all = ["name", "group", "path"])]
        from_file: Option<PathBuf>,

        /// API name
        #[arg(long, required_unless_present = "from_file")]
        name: Option<String>,

        /// Owning group ID
        #[arg(long, required_unless_present = "from_file")]
        group: Option<String>,

        /// Frontend request path
        #[arg(long, required_unless_present = "from_file")]
        path: Option<String>,

        /// Frontend HTTP method
        #[arg(long, default_value = "GET")]
        method: String,

        /// Frontend protocol: HTTP, HTTPS or BOTH
        #[arg(long, default_value = "HTTPS")]
        protocol: String,

        /// Authentication: NONE, APP, IAM or AUTHORIZER
        #[arg(long, default_value = "NONE")]
        auth_type: String,

        /// Backend address (host[:port])
        #[arg(long)]
        backend_address: Option<String>,

        /// Backend request path (defaults to the frontend path)
        #[arg(long)]
        backend_path: Option<String>,

        /// Backend timeout in milliseconds
        #[arg(long, default_value = "5000")]
        backend_timeout: i64,
    },

    /// Delete an API
    #[command(alias = "rm")]
    Delete {
        /// API ID
        id: String,
    },

    /// Publish an API to an environment
    Publish {
        /// API ID
        id: String,

        /// Environment ID
        #[arg(long, short = 'e')]
        env: String,

        /// Publication note
        #[arg(long)]
        remark: Option<String>,
    },

    /// Take an API offline in an environment
    Offline {
        /// API ID
        id: String,

        /// Environment ID
        #[arg(long, short = 'e')]
        env: String,
    },
}

// ── Environments ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApigEnvArgs {
    #[command(flatten)]
    pub scope: GatewayScope,

    #[command(subcommand)]
    pub command: ApigEnvCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApigEnvCommand {
    /// List environments
    #[command(alias = "ls")]
    List(ListArgs),

    /// Create an environment
    Create {
        /// Environment name
        #[arg(long)]
        name: String,

        /// Description
        #[arg(long)]
        remark: Option<String>,
    },

    /// Delete an environment
    #[command(alias = "rm")]
    Delete {
        /// Environment ID
        id: String,
    },
}

// ── Signatures ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApigSignatureArgs {
    #[command(flatten)]
    pub scope: GatewayScope,

    #[command(subcommand)]
    pub command: ApigSignatureCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApigSignatureCommand {
    /// List signature keys
    #[command(alias = "ls")]
    List(ListArgs),

    /// Create a signature key
    Create {
        /// Key name
        #[arg(long)]
        name: String,

        /// Key type: hmac, basic, public_key or aes
        #[arg(long = "type")]
        sign_type: Option<String>,

        /// Key (generated when omitted)
        #[arg(long)]
        key: Option<String>,

        /// Secret (generated when omitted)
        #[arg(long)]
        secret: Option<String>,
    },

    /// Delete a signature key
    #[command(alias = "rm")]
    Delete {
        /// Signature ID
        id: String,
    },

    /// Bind a signature key to published APIs
    Bind {
        /// Signature ID
        id: String,

        /// Publication ID of an API (repeatable)
        #[arg(long = "publish-id", required = true)]
        publish_ids: Vec<String>,
    },

    /// List the APIs a signature key is bound to
    Bindings {
        /// Signature ID
        id: String,
    },

    /// Remove a signature binding
    Unbind {
        /// Binding ID
        binding: String,
    },
}

// ── Throttling ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApigThrottleArgs {
    #[command(flatten)]
    pub scope: GatewayScope,

    #[command(subcommand)]
    pub command: ApigThrottleCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApigThrottleCommand {
    /// List throttling policies
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a throttling policy
    Show {
        /// Policy ID
        id: String,
    },

    /// Create a throttling policy
    Create {
        /// Policy name
        #[arg(long)]
        name: String,

        /// Max API calls per interval
        #[arg(long)]
        api_calls: i64,

        /// Interval length
        #[arg(long)]
        interval: i64,

        /// Interval unit: SECOND, MINUTE, HOUR or DAY
        #[arg(long, default_value = "MINUTE")]
        unit: String,

        /// Max calls per user per interval
        #[arg(long)]
        user_calls: Option<i64>,

        /// Max calls per app per interval
        #[arg(long)]
        app_calls: Option<i64>,

        /// Max calls per source IP per interval
        #[arg(long)]
        ip_calls: Option<i64>,

        /// Description
        #[arg(long)]
        remark: Option<String>,
    },

    /// Delete a throttling policy
    #[command(alias = "rm")]
    Delete {
        /// Policy ID
        id: String,
    },

    /// Apply a throttling policy to published APIs
    Bind {
        /// Policy ID
        id: String,

        /// Publication ID of an API (repeatable)
        #[arg(long = "publish-id", required = true)]
        publish_ids: Vec<String>,
    },

    /// List the APIs a throttling policy is bound to
    Bindings {
        /// Policy ID
        id: String,
    },

    /// Remove one or more throttling bindings
    Unbind {
        /// Binding IDs
        #[arg(required = true)]
        bindings: Vec<String>,
    },
}

// ── ACLs ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApigAclArgs {
    #[command(flatten)]
    pub scope: GatewayScope,

    #[command(subcommand)]
    pub command: ApigAclCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApigAclCommand {
    /// List ACL policies
    #[command(alias = "ls")]
    List(ListArgs),

    /// Create an ACL policy
    Create {
        /// Policy name
        #[arg(long)]
        name: String,

        /// PERMIT or DENY
        #[arg(long = "type", default_value = "DENY")]
        acl_type: String,

        /// Comma-separated IPs, ranges or account names
        #[arg(long)]
        value: String,

        /// IP or DOMAIN
        #[arg(long, default_value = "IP")]
        entity_type: String,
    },

    /// Delete an ACL policy
    #[command(alias = "rm")]
    Delete {
        /// Policy ID
        id: String,
    },
}

// ── VPC channels ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApigChannelArgs {
    #[command(flatten)]
    pub scope: GatewayScope,

    #[command(subcommand)]
    pub command: ApigChannelCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApigChannelCommand {
    /// List VPC channels
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a VPC channel
    Show {
        /// Channel ID
        id: String,
    },

    /// Create a VPC channel of backend IPs
    Create {
        /// Read the full request body from a JSON file
        #[arg(long, conflicts_with_all = ["name", "port", "member"])]
        from_file: Option<PathBuf>,

        /// Channel name
        #[arg(long, required_unless_present = "from_file")]
        name: Option<String>,

        /// Backend port
        #[arg(long, required_unless_present = "from_file")]
        port: Option<i32>,

        /// Backend IP address (repeatable)
        #[arg(long)]
        member: Vec<String>,
    },

    /// Delete a VPC channel
    #[command(alias = "rm")]
    Delete {
        /// Channel ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOAD BALANCERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LbArgs {
    #[command(subcommand)]
    pub command: LbCommand,
}

#[derive(Debug, Subcommand)]
pub enum LbCommand {
    /// List load balancers
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a load balancer
    Show {
        /// Load balancer ID or name
        lb: String,
    },

    /// Create a load balancer
    Create {
        /// Read the full request body from a JSON file
        #[arg(long, conflicts_with_all = ["name", "vpc", "az"])]
        from_file: Option<PathBuf>,

        /// Name
        #[arg(long, required_unless_present = "from_file")]
        name: Option<String>,

        /// VPC ID
        #[arg(long, required_unless_present = "from_file")]
        vpc: Option<String>,

        /// Availability zone (repeatable)
        #[arg(long, required_unless_present = "from_file")]
        az: Vec<String>,

        /// IPv4 subnet ID for the VIP
        #[arg(long)]
        subnet: Option<String>,

        /// Layer-4 flavor ID
        #[arg(long)]
        l4_flavor: Option<String>,

        /// Layer-7 flavor ID
        #[arg(long)]
        l7_flavor: Option<String>,

        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// Update a load balancer
    Set {
        /// Load balancer ID or name
        lb: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// Enable or disable deletion protection
        #[arg(long)]
        deletion_protection: Option<bool>,
    },

    /// Delete a load balancer
    #[command(alias = "rm")]
    Delete {
        /// Load balancer ID or name
        lb: String,
    },

    /// Listeners
    Listener(LbListenerArgs),

    /// Backend server pools
    Pool(LbPoolArgs),

    /// Pool members
    Member(LbMemberArgs),
}

#[derive(Debug, Args)]
pub struct LbListenerArgs {
    #[command(subcommand)]
    pub command: LbListenerCommand,
}

#[derive(Debug, Subcommand)]
pub enum LbListenerCommand {
    /// List listeners
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a listener
    Show {
        /// Listener ID
        id: String,
    },

    /// Create a listener
    Create {
        /// Owning load balancer ID
        #[arg(long)]
        lb: String,

        /// TCP, UDP, HTTP or HTTPS
        #[arg(long)]
        protocol: String,

        /// Frontend port
        #[arg(long)]
        port: i32,

        /// Name
        #[arg(long)]
        name: Option<String>,

        /// Default pool ID
        #[arg(long)]
        default_pool: Option<String>,
    },

    /// Delete a listener
    #[command(alias = "rm")]
    Delete {
        /// Listener ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct LbPoolArgs {
    #[command(subcommand)]
    pub command: LbPoolCommand,
}

#[derive(Debug, Subcommand)]
pub enum LbPoolCommand {
    /// List pools
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a pool
    Show {
        /// Pool ID
        id: String,
    },

    /// Create a pool
    Create {
        /// TCP, UDP, HTTP or HTTPS
        #[arg(long)]
        protocol: String,

        /// ROUND_ROBIN, LEAST_CONNECTIONS or SOURCE_IP
        #[arg(long, default_value = "ROUND_ROBIN")]
        algorithm: String,

        /// Attach to a load balancer
        #[arg(long)]
        lb: Option<String>,

        /// Attach to a listener
        #[arg(long)]
        listener: Option<String>,

        /// Name
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a pool
    #[command(alias = "rm")]
    Delete {
        /// Pool ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct LbMemberArgs {
    /// Pool ID
    #[arg(long)]
    pub pool: String,

    #[command(subcommand)]
    pub command: LbMemberCommand,
}

#[derive(Debug, Subcommand)]
pub enum LbMemberCommand {
    /// List pool members
    #[command(alias = "ls")]
    List(ListArgs),

    /// Add a backend server to the pool
    Add {
        /// Backend IP address
        #[arg(long)]
        address: String,

        /// Backend port
        #[arg(long)]
        port: i32,

        /// Subnet of the address (omit for cross-VPC IP targets)
        #[arg(long)]
        subnet: Option<String>,

        /// Weight (0-100)
        #[arg(long)]
        weight: Option<i32>,

        /// Name
        #[arg(long)]
        name: Option<String>,
    },

    /// Remove a member from the pool
    #[command(alias = "rm")]
    Remove {
        /// Member ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  NAT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct NatArgs {
    #[command(subcommand)]
    pub command: NatCommand,
}

#[derive(Debug, Subcommand)]
pub enum NatCommand {
    /// List NAT gateways
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a NAT gateway
    Show {
        /// Gateway ID or name
        gateway: String,
    },

    /// Create a NAT gateway
    Create {
        /// Name
        #[arg(long)]
        name: String,

        /// Size: 1 (small) to 4 (extra-large)
        #[arg(long, default_value = "1")]
        spec: String,

        /// VPC (router) ID
        #[arg(long)]
        router: String,

        /// Network ID of the downstream subnet
        #[arg(long)]
        network: String,

        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// Update a NAT gateway
    Set {
        /// Gateway ID or name
        gateway: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New size
        #[arg(long)]
        spec: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a NAT gateway
    #[command(alias = "rm")]
    Delete {
        /// Gateway ID or name
        gateway: String,
    },

    /// SNAT rules
    Snat(NatSnatArgs),

    /// DNAT rules
    Dnat(NatDnatArgs),
}

#[derive(Debug, Args)]
pub struct NatSnatArgs {
    #[command(subcommand)]
    pub command: NatSnatCommand,
}

#[derive(Debug, Subcommand)]
pub enum NatSnatCommand {
    /// List SNAT rules
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a SNAT rule
    Show {
        /// Rule ID
        id: String,
    },

    /// Create a SNAT rule
    Create {
        /// NAT gateway ID
        #[arg(long)]
        gateway: String,

        /// Floating IP ID
        #[arg(long)]
        floating_ip: String,

        /// Network ID (mutually exclusive with --cidr)
        #[arg(long, conflicts_with = "cidr", required_unless_present = "cidr")]
        network: Option<String>,

        /// CIDR block (mutually exclusive with --network)
        #[arg(long)]
        cidr: Option<String>,
    },

    /// Delete a SNAT rule
    #[command(alias = "rm")]
    Delete {
        /// Rule ID
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct NatDnatArgs {
    #[command(subcommand)]
    pub command: NatDnatCommand,
}

#[derive(Debug, Subcommand)]
pub enum NatDnatCommand {
    /// List DNAT rules
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a DNAT rule
    Show {
        /// Rule ID
        id: String,
    },

    /// Create a DNAT rule
    Create {
        /// NAT gateway ID
        #[arg(long)]
        gateway: String,

        /// Floating IP ID
        #[arg(long)]
        floating_ip: String,

        /// tcp, udp or any
        #[arg(long, default_value = "tcp")]
        protocol: String,

        /// Backend port ID (mutually exclusive with --private-ip)
        #[arg(long, conflicts_with = "private_ip", required_unless_present = "private_ip")]
        port_id: Option<String>,

        /// Backend private IP (mutually exclusive with --port-id)
        #[arg(long)]
        private_ip: Option<String>,

        /// Backend port
        #[arg(long)]
        internal_port: i32,

        /// Public port
        #[arg(long)]
        external_port: i32,
    },

    /// Delete a DNAT rule
    #[command(alias = "rm")]
    Delete {
        /// Rule ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MODELARTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ModelartsArgs {
    #[command(subcommand)]
    pub command: ModelartsCommand,
}

/// Training job listing: filters plus paging.
#[derive(Debug, Args)]
pub struct TrainingJobListArgs {
    #[command(flatten)]
    pub list: ListArgs,

    /// Number of jobs to skip
    #[arg(long)]
    pub offset: Option<i64>,

    /// Page size
    #[arg(long)]
    pub limit: Option<i64>,
}

#[derive(Debug, Subcommand)]
pub enum ModelartsCommand {
    /// List training jobs
    #[command(alias = "ls")]
    List(TrainingJobListArgs),

    /// Show a training job
    Show {
        /// Job ID
        id: String,
    },

    /// Create a training job
    Create {
        /// Job name
        #[arg(long)]
        name: String,

        /// Resource flavor (numeric spec ID on the v1 API)
        #[arg(long)]
        flavor: String,

        /// Number of nodes
        #[arg(long, default_value = "1")]
        nodes: i32,

        /// OBS directory holding the training code
        #[arg(long)]
        code_dir: Option<String>,

        /// OBS path of the boot file
        #[arg(long)]
        boot_file: Option<String>,

        /// AI engine (numeric engine ID on the v1 API)
        #[arg(long)]
        engine: Option<String>,

        /// Engine version
        #[arg(long)]
        engine_version: Option<String>,

        /// Custom image URL
        #[arg(long)]
        image: Option<String>,

        /// Boot command for custom images
        #[arg(long)]
        command: Option<String>,

        /// OBS input data path
        #[arg(long)]
        data_url: Option<String>,

        /// OBS output path
        #[arg(long)]
        train_url: Option<String>,

        /// Hyperparameter (repeatable)
        #[arg(long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,

        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a training job
    #[command(alias = "rm")]
    Delete {
        /// Job ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ENDPOINTS / RAW
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EndpointsArgs {
    /// Services to resolve (all when omitted)
    #[arg(value_enum)]
    pub services: Vec<ServiceArg>,
}

#[derive(Debug, Args)]
pub struct RawArgs {
    /// Service whose client sends the request
    #[arg(value_enum)]
    pub service: ServiceArg,

    /// HTTP method
    pub method: String,

    /// Path relative to the resolved endpoint
    pub path: String,

    /// Query parameter (repeatable)
    #[arg(long, value_name = "KEY=VALUE")]
    pub query: Vec<String>,

    /// JSON request body
    #[arg(long, short = 'd', conflicts_with = "from_file")]
    pub data: Option<String>,

    /// Read the JSON request body from a file
    #[arg(long)]
    pub from_file: Option<PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key, or services.<type>.<api_version|endpoint_override>
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password or token in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
