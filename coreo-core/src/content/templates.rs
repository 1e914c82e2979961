//! Composite scaffold templates
//!
//! File and folder names plus the text written by `composite init`.
//! `{ticks}` placeholders are replaced with a markdown code fence.

pub const README_NAME: &str = "README.md";
pub const CONFIG_YAML_NAME: &str = "config.yaml";
pub const CONFIG_RB_NAME: &str = "config.rb";
pub const TABLE_YAML_NAME: &str = "table.yaml";
pub const SUPPRESSION_YAML_NAME: &str = "suppression.yaml";
pub const ORDER_YAML_NAME: &str = "order.yaml";

pub const OVERRIDES_FOLDER: &str = "overrides";
pub const SERVICES_FOLDER: &str = "services";
pub const OPERATIONAL_SCRIPTS_FOLDER: &str = "operational-scripts";
pub const BOOT_SCRIPTS_FOLDER: &str = "boot-scripts";
pub const SHUTDOWN_SCRIPTS_FOLDER: &str = "shutdown-scripts";

const CODE_TICKS: &str = "```";

const OVERRIDES_README: &str = r#"# Overrides

Files placed in this folder replace the file at the same path in any
composite or stack this composite extends. Mirror the path of the file
you want to override, starting from the stack root:

{ticks}
overrides/
└── stack-aws-vpc/
    └── services/
        └── config.rb
{ticks}

Overrides are applied last, after every extended composite is merged.
"#;

const SERVICES_README: &str = r#"# Services

`config.rb` declares the resources this composite manages. Each resource
names its type, its desired action, and its inputs:

{ticks}
coreo_aws_vpc_vpc "my-vpc" do
  action :sustain
  cidr "12.0.0.0/16"
  internet_gateway true
end
{ticks}

Variables from `config.yaml` are available as `${VARIABLE_NAME}`.
"#;

const SERVICES_CONFIG_RB: &str = r#"## This file was auto-generated by coreo composite init.
## Declare the resources of this composite below.
"#;

const TABLE_YAML: &str = r#"# Columns shown for each audit rule in the report table.
# rule_name:
#   display_name: "Column title"
#   fields:
#     - field_name
"#;

const SUPPRESSION_YAML: &str = r#"# Violations listed here are excluded from audit reports.
# rule_name:
#   - object_id:
#       date: "YYYY-MM-DD"   # suppression expires on this date
"#;

const OPERATIONAL_README: &str = r#"# Operational scripts

Scripts in this folder are run on demand against running servers.
They are never run automatically at boot or shutdown.
"#;

const BOOT_README: &str = r#"# Boot scripts

Scripts in this folder run when a server boots, in the order given by
`order.yaml`:

{ticks}
script-order:
  - install_packages.sh
  - configure_app.sh
{ticks}
"#;

const BOOT_ORDER_YAML: &str = r#"script-order:
"#;

const SHUTDOWN_README: &str = r#"# Shutdown scripts

Scripts in this folder run when a server shuts down, in the order given by
`order.yaml`:

{ticks}
script-order:
  - drain_connections.sh
  - backup_logs.sh
{ticks}
"#;

const SHUTDOWN_ORDER_YAML: &str = r#"script-order:
"#;

fn render(template: &str) -> String {
    template.replace("{ticks}", CODE_TICKS)
}

pub fn overrides_readme() -> String {
    render(OVERRIDES_README)
}

pub fn services_readme() -> String {
    render(SERVICES_README)
}

pub fn services_config_rb() -> String {
    render(SERVICES_CONFIG_RB)
}

pub fn table_yaml() -> String {
    render(TABLE_YAML)
}

pub fn suppression_yaml() -> String {
    render(SUPPRESSION_YAML)
}

pub fn operational_readme() -> String {
    render(OPERATIONAL_README)
}

pub fn boot_readme() -> String {
    render(BOOT_README)
}

pub fn boot_order_yaml() -> String {
    render(BOOT_ORDER_YAML)
}

pub fn shutdown_readme() -> String {
    render(SHUTDOWN_README)
}

pub fn shutdown_order_yaml() -> String {
    render(SHUTDOWN_ORDER_YAML)
}
