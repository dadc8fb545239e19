use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde::Serialize;

use sharemask_core::Share;

/// Create a styled table for output
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS);
    table
}

/// Shorten a share id for table display
pub fn short_id(id: &str) -> &str {
    id.get(..12).unwrap_or(id)
}

/// Format the exclusion flag
pub fn format_excluded(is_excluded: bool) -> &'static str {
    if is_excluded { "excluded" } else { "shared" }
}

/// What a peer is allowed to learn about a share
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteShare<'a> {
    pub id: &'a str,
    pub remote_path: &'a str,
    pub is_excluded: bool,
}

impl<'a> From<&'a Share> for RemoteShare<'a> {
    fn from(share: &'a Share) -> Self {
        Self {
            id: share.id().as_str(),
            remote_path: share.remote_path(),
            is_excluded: share.is_excluded(),
        }
    }
}

/// Print shares as a table or pretty JSON.
///
/// With `remote_only`, local paths and raw definitions are left out so the
/// output can be pasted anywhere without revealing the real layout.
pub fn print_shares(shares: &[Share], json: bool, remote_only: bool) -> anyhow::Result<()> {
    if json {
        let rendered = if remote_only {
            let remote: Vec<RemoteShare<'_>> = shares.iter().map(RemoteShare::from).collect();
            serde_json::to_string_pretty(&remote)?
        } else {
            serde_json::to_string_pretty(shares)?
        };
        println!("{rendered}");
        return Ok(());
    }

    let mut table = create_table();
    if remote_only {
        table.set_header(vec!["Id", "Status", "Remote Path"]);
    } else {
        table.set_header(vec!["Id", "Status", "Remote Path", "Local Path"]);
    }

    for share in shares {
        let mut row = vec![
            short_id(share.id().as_str()).to_string(),
            format_excluded(share.is_excluded()).to_string(),
            share.remote_path().to_string(),
        ];
        if !remote_only {
            row.push(share.local_path().to_string());
        }
        table.add_row(row);
    }

    println!("{table}");
    Ok(())
}
