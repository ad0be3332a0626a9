//! Chat notice sent to a player after a successful capture.

use crate::extract::CapturePayload;
use bridge_api::{PlayerDirectory, PlayerRef, ServerError};

pub const NOTICE_HEADER: &str = "§6[Cobblemon] §a你成功捕获了一只精灵！";

/// The notice, one chat line per entry, in delivery order.
pub fn notice_lines(payload: &CapturePayload) -> [String; 5] {
    [
        NOTICE_HEADER.to_string(),
        format!("§6精灵: §f{}", payload.species_name),
        format!("§6性格: §f{}", payload.nature_name),
        format!("§6等级: §f{}", payload.level),
        format!("§6闪光: §f{}", if payload.is_shiny { "是" } else { "否" }),
    ]
}

/// Sends every notice line to `player`, stopping at the first failed send.
///
/// Returns the number of lines delivered.
pub fn deliver(
    directory: &dyn PlayerDirectory,
    player: &PlayerRef,
    payload: &CapturePayload,
) -> Result<usize, ServerError> {
    let lines = notice_lines(payload);
    for line in &lines {
        directory.send_message(player, line)?;
    }
    Ok(lines.len())
}
