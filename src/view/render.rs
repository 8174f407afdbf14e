//! Plain-text rendering of controller snapshots

use std::fmt::Write;

use crate::browser::{BrowserSnapshot, ListKind, Selection};
use crate::dashboard::{CommunityCard, DashboardSnapshot, PostCard};
use crate::model::Community;
use crate::view::{Panel, Tab};

/// Both community lists with their row buttons
pub fn render_community_lists(snap: &BrowserSnapshot) -> String {
    let mut out = String::new();
    write_community_list(&mut out, "All Communities", &snap.all_communities, ListKind::All);
    out.push('\n');
    write_community_list(
        &mut out,
        "Joined Communities",
        &snap.joined_communities,
        ListKind::Joined,
    );
    out
}

fn write_community_list(out: &mut String, title: &str, panel: &Panel<Community>, kind: ListKind) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "-".repeat(40));
    if let Some(text) = panel.placeholder() {
        let _ = writeln!(out, "  {}", text);
        return;
    }
    for community in panel.items() {
        let _ = writeln!(
            out,
            "  {:<6} {:<26} [{}]",
            community.id,
            community.name,
            kind.button_label()
        );
    }
}

/// Detail heading, tab strip and the active pane
pub fn render_community_detail(snap: &BrowserSnapshot) -> String {
    let mut out = String::new();
    let Some(heading) = &snap.heading else {
        let _ = writeln!(out, "No community selected.");
        return out;
    };

    let _ = writeln!(out, "{} (#{})", heading.name, heading.id);
    let tabs: Vec<String> = Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == snap.active_tab {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect();
    let _ = writeln!(out, "{}", tabs.join(" "));
    let _ = writeln!(out, "{}", "-".repeat(40));

    let lines: Vec<String> = match snap.active_tab {
        Tab::Posts => pane_lines(&snap.posts, |p| p.title.clone()),
        Tab::Announcements => pane_lines(&snap.announcements, |a| a.title.clone()),
        Tab::Members => pane_lines(&snap.members, |m| {
            format!("{} - {} ({})", m.name, m.role, m.color.as_str())
        }),
    };
    for line in lines {
        let _ = writeln!(out, "  {}", line);
    }

    match snap.selection {
        Selection::Loaded if snap.post_form.visible => {
            let _ = writeln!(out, "\nCreate a post in {}", heading.name);
        }
        Selection::LoadFailed => {
            let _ = writeln!(out, "\nCould not load this community.");
        }
        _ => {}
    }
    out
}

fn pane_lines<T>(panel: &Panel<T>, f: impl Fn(&T) -> String) -> Vec<String> {
    match panel.placeholder() {
        Some(text) => vec![text.to_string()],
        None => panel.items().iter().map(f).collect(),
    }
}

pub fn render_dashboard(snap: &DashboardSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  ({})  Notifications: {}",
        snap.profile.greeting, snap.profile.avatar, snap.announcement_badge
    );
    out.push('\n');

    let _ = writeln!(out, "Communities");
    let _ = writeln!(out, "{}", "-".repeat(40));
    match snap.communities.placeholder() {
        Some(text) => {
            let _ = writeln!(out, "  {}", text);
        }
        None => {
            for card in snap.communities.items() {
                write_community_card(&mut out, card);
            }
        }
    }
    out.push('\n');

    let _ = writeln!(out, "Posts");
    let _ = writeln!(out, "{}", "-".repeat(40));
    match snap.feed.placeholder() {
        Some(text) => {
            let _ = writeln!(out, "  {}", text);
        }
        None => {
            for card in snap.feed.items() {
                write_post_card(&mut out, card);
            }
        }
    }
    out
}

fn write_community_card(out: &mut String, card: &CommunityCard) {
    let _ = writeln!(
        out,
        "  {:<6} {:<26} {:>12}  [{}]",
        card.id,
        card.name,
        card.members_label,
        CommunityCard::BUTTON_LABEL
    );
    let _ = writeln!(out, "         {}", card.description);
}

fn write_post_card(out: &mut String, card: &PostCard) {
    let _ = writeln!(out, "  #{:<5} {}", card.post_id, card.title);
    if !card.content.is_empty() {
        let _ = writeln!(out, "         {}", card.content);
    }
    let _ = writeln!(
        out,
        "         [{}] [{}] [{}]",
        card.like_label(),
        PostCard::SHARE_LABEL,
        card.join_label()
    );
}
