use crate::state::{ThemeMode, ViewState};
use colored::{ColoredString, Colorize};
use std::fmt::Write;

struct Palette {
    heading: fn(&str) -> ColoredString,
    label: fn(&str) -> ColoredString,
    muted: fn(&str) -> ColoredString,
}

fn palette(theme: ThemeMode) -> Palette {
    match theme {
        ThemeMode::Light => Palette {
            heading: |s| s.bold().blue(),
            label: |s| s.bold(),
            muted: |s| s.dimmed(),
        },
        ThemeMode::Dark => Palette {
            heading: |s| s.bold().bright_cyan(),
            label: |s| s.bold().bright_white(),
            muted: |s| s.bright_black(),
        },
    }
}

fn or_blank(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/// Render the view state as terminal text.
pub fn render(view: &ViewState) -> String {
    let p = palette(view.theme);
    let mut out = String::new();

    let _ = writeln!(out, "{}", (p.heading)("GitHub User Information"));
    let _ = writeln!(out, "{}", (p.muted)(&"=".repeat(50)));

    if view.loading {
        let _ = writeln!(out, "{}", (p.muted)("Loading..."));
    }

    if let Some(user) = &view.profile {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", (p.heading)(&user.login));
        if let Some(avatar) = &user.avatar_url {
            let _ = writeln!(out, "{} {}", (p.label)("Avatar:"), avatar);
        }
        let _ = writeln!(out, "{} {}", (p.label)("Name:"), or_blank(&user.name));
        let _ = writeln!(out, "{} {}", (p.label)("Bio:"), or_blank(&user.bio));
        let _ = writeln!(out, "{} {}", (p.label)("Location:"), or_blank(&user.location));
        let _ = writeln!(out, "{} {}", (p.label)("Followers:"), user.followers);
        let _ = writeln!(out, "{} {}", (p.label)("Following:"), user.following);
        let _ = writeln!(out, "{} {}", (p.label)("Public Repositories:"), user.public_repos);
    }

    if view.has_query() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", (p.heading)("Repositories"));

        for repo in &view.repositories {
            let _ = writeln!(out, "  {}", (p.label)(&repo.full_name));
            if let Some(description) = &repo.description {
                let _ = writeln!(out, "    {}", description);
            }
            let _ = writeln!(
                out,
                "    {}",
                (p.muted)(&format!(
                    "Language: {}  Forks: {}  Watchers: {}",
                    or_blank(&repo.language),
                    repo.forks,
                    repo.watchers
                ))
            );
        }

        let _ = writeln!(
            out,
            "{}",
            (p.muted)(&format!(
                "Page {} of {}",
                view.page.current_page, view.page.total_pages
            ))
        );
    }

    out
}
