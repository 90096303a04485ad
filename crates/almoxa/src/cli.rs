//! Command-line definitions.

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "almoxa",
    version,
    about = "Inventory and tooling management from the terminal",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use.
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides the profile).
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Tenant id to act in (overrides the persisted selection).
    #[arg(long, global = true)]
    pub tenant: Option<String>,

    /// Output format.
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Skip TLS certificate verification.
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Assume yes on confirmation prompts.
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Authenticate and persist the session.
    Login(LoginArgs),
    /// Drop the session locally and server-side.
    Logout,
    /// List or select tenancies.
    #[command(subcommand)]
    Tenants(TenantsCmd),
    /// Manage tools in stock.
    #[command(subcommand)]
    Tools(ToolsCmd),
    /// Manage collaborators.
    #[command(subcommand)]
    Collaborators(CollaboratorsCmd),
    /// Register and inspect stock movements.
    #[command(subcommand)]
    Movements(MovementsCmd),
    /// Manage production orders.
    #[command(subcommand)]
    Orders(OrdersCmd),
    /// Stock dashboard: totals, cost centers, restock list.
    Report,
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

// ── Auth ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted).
    #[arg(long)]
    pub email: Option<String>,
}

// ── Tenants ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum TenantsCmd {
    /// List tenancies visible to the account.
    List,
    /// Select the tenancy subsequent commands act in.
    Use { tenant_id: String },
}

// ── Tools ───────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ToolsCmd {
    /// List tools, with group and manufacturer sideloaded.
    List {
        /// Filter by description substring.
        #[arg(long)]
        search: Option<String>,
    },
    /// Create or update a tool.
    Add(ToolAddArgs),
    /// Toggle the pre-ordered flag.
    PreOrder {
        id: String,
        /// Clear the flag instead of setting it.
        #[arg(long)]
        undo: bool,
    },
    /// Delete tools by id.
    Remove { ids: Vec<String> },
}

#[derive(Debug, Args)]
pub struct ToolAddArgs {
    /// Existing tool id (updates instead of creating).
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub code: Option<String>,
    #[arg(long)]
    pub description: String,
    /// Stock unit (un, cx, kg, ...).
    #[arg(long)]
    pub unit: Option<String>,
    #[arg(long)]
    pub minimum_stock: Option<f64>,
    #[arg(long)]
    pub group_id: Option<String>,
    #[arg(long)]
    pub manufacturer_id: Option<String>,
}

// ── Collaborators ───────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum CollaboratorsCmd {
    List,
    /// Invite a new collaborator (or update an existing one by id).
    Invite(CollaboratorInviteArgs),
    /// Resend the invite email.
    ResendInvite { id: String },
    /// Remove a collaborator, recording a justification.
    Remove {
        id: String,
        #[arg(long)]
        justification: String,
    },
}

#[derive(Debug, Args)]
pub struct CollaboratorInviteArgs {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub registration: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
}

// ── Movements ───────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum MovementsCmd {
    /// List stock movements with their lines.
    List {
        /// Restrict to one direction: entry or exit.
        #[arg(long)]
        direction: Option<String>,
    },
    /// Register a stock entry (items arriving from a provider).
    Entry(MovementArgs),
    /// Register a stock exit (items withdrawn by a collaborator).
    Exit(MovementArgs),
}

#[derive(Debug, Args)]
pub struct MovementArgs {
    /// Fiscal document / requisition number.
    #[arg(long)]
    pub document: Option<String>,
    #[arg(long)]
    pub cost_center: Option<String>,
    /// Entries: supplying provider id.
    #[arg(long)]
    pub provider: Option<String>,
    /// Exits: withdrawing collaborator id.
    #[arg(long)]
    pub collaborator: Option<String>,
    /// Movement line as `item_id:quantity[:unit_price]`; repeatable.
    #[arg(long = "item", required = true)]
    pub items: Vec<String>,
}

// ── Orders ──────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum OrdersCmd {
    List,
    /// Create or update a production order.
    Add(OrderAddArgs),
    /// Close an order.
    Close { id: String },
    Remove { ids: Vec<String> },
}

#[derive(Debug, Args)]
pub struct OrderAddArgs {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub number: Option<String>,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub machine_id: Option<String>,
    #[arg(long)]
    pub cost_center_id: Option<String>,
}

// ── Completions ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
