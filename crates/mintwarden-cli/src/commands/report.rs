use std::path::Path;

use anyhow::Result;

use reporting::json::render_json;
use reporting::timeline::timeline;
use reporting::TokenReport;

pub fn execute(input: &Path, json: bool, show_timeline: bool) -> Result<()> {
    let report = TokenReport::load(input)?;

    if json {
        println!("{}", render_json(&report));
    } else if show_timeline {
        for line in timeline(&report.verdict) {
            println!("{line}");
        }
    } else {
        println!("{}", report.human_summary());
    }
    Ok(())
}
