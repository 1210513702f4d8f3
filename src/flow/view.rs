use console::style;

use crate::ui::style::{accent, dim, header, warn};
use crate::workflow::posts::PostResultSet;
use crate::workflow::topics::TopicCandidateSet;
use crate::workflow::types::Channel;

pub fn print_welcome_banner() {
    println!();
    println!("  {}", header("salonpost — SNS posts for your salon"));
    println!(
        "  {}",
        dim("profile → topic → posts → review, regenerate as often as you like")
    );
    println!();
}

pub fn print_step(current: u8, total: u8, title: &str) {
    println!();
    println!(
        "  {} {}",
        style(format!("[{current}/{total}]")).cyan().bold(),
        header(title)
    );
    println!("  {}", dim("─".repeat(50)));
}

pub fn print_bullet(text: &str) {
    println!("  {} {}", style("›").cyan(), text);
}

pub fn print_error(text: &str) {
    println!();
    println!("  {} {}", style("✗").red().bold(), text);
}

pub fn print_placeholder_notice() {
    println!(
        "  {} {}",
        style("!").yellow().bold(),
        warn("placeholder content — not generated by the service")
    );
}

pub fn print_candidates(set: &TopicCandidateSet) {
    println!();
    if set.origin().is_placeholder() {
        print_placeholder_notice();
    }
    for (i, candidate) in set.candidates().iter().enumerate() {
        let marker = if i == set.active_index() { "●" } else { "○" };
        println!(
            "  {} {} {}",
            accent(marker),
            header(&candidate.summary),
            dim(format!("({} chars)", candidate.body.chars().count()))
        );
        for line in candidate.body.lines() {
            println!("      {line}");
        }
        println!();
    }
}

pub fn print_posts(set: &PostResultSet) {
    println!();
    if set.origin().is_placeholder() {
        print_placeholder_notice();
    }
    for post in set.posts() {
        let composed = set.composed_text(post.channel).unwrap_or_default();
        let chars = set.char_count(post.channel).unwrap_or_default();
        println!(
            "  {} {} {}",
            accent("◆"),
            header(post.channel.label()),
            dim(format!("({chars} chars)"))
        );
        for line in composed.lines() {
            println!("      {line}");
        }
        println!();
    }
}

pub fn channel_option_label(channel: Channel, selected: bool) -> String {
    format!(
        "{:<10} {}",
        channel.label(),
        if selected {
            "✅ selected".to_string()
        } else {
            format!("— {}", channel.description())
        }
    )
}
