//! Text rendering of the three screens.

use shopfront_core::{PasswordStrength, Route};
use tokio::time::Instant;

use super::command::{Screen, HELP};
use super::Shell;
use crate::commands;
use crate::navigation::NavigationMode;

const RULE: &str = "========================================================";

impl Shell {
    /// The full screen for the current route, ending with a prompt.
    pub fn render(&mut self) -> String {
        self.sync_route();

        let route = self.navigator.current();
        let mut lines = vec![
            RULE.to_string(),
            format!(" Shopfront{:>46}", route.path()),
            RULE.to_string(),
        ];

        if let Some(banner) = &self.view.banner {
            lines.push(format!(" ! {}", banner));
            lines.push(String::new());
        }

        match Screen::from(route) {
            Screen::Registration => self.render_registration(&mut lines),
            Screen::Login => self.render_login(&mut lines),
            Screen::Home => self.render_home(&mut lines),
        }

        if let Some(notice) = &self.view.notice {
            lines.push(String::new());
            lines.push(format!(" {}", notice));
        }

        if let Some(logs) = &self.view.logs {
            lines.push(String::new());
            lines.push(" Activity log".to_string());
            if logs.is_empty() {
                lines.push("   (empty)".to_string());
            }
            lines.extend(logs.iter().map(|line| format!("   {}", line)));
        }

        if self.view.help {
            lines.push(String::new());
            lines.extend(HELP.lines().map(|line| format!(" {}", line)));
        }

        if let Some(pending) = self.navigator.pending() {
            let remaining = pending.fires_at.saturating_duration_since(Instant::now());
            let verb = match pending.mode {
                NavigationMode::Push => "Going",
                NavigationMode::Replace => "Switching",
            };
            lines.push(String::new());
            lines.push(format!(
                " {} to {} in {:.1}s (type `cancel` to stay)",
                verb,
                pending.target,
                remaining.as_secs_f64()
            ));
        }

        lines.push(String::new());
        lines.push("> ".to_string());
        lines.join("\n")
    }

    fn render_registration(&self, lines: &mut Vec<String>) {
        lines.push(" Create Account".to_string());
        lines.push("   register <email> <password> <confirm>".to_string());

        if let Some(errors) = &self.view.form_errors {
            let fields = [
                ("Email", &errors.email),
                ("Password", &errors.password),
                ("Confirm", &errors.confirm_password),
            ];
            for (label, message) in fields {
                if let Some(message) = message {
                    lines.push(format!("   {:<9} {}", label, message));
                }
            }
        }

        if let Some(strength) = self.view.strength {
            if strength != PasswordStrength::None {
                lines.push(format!(
                    "   {} [{:<10}] {}% ({})",
                    strength.label(),
                    "#".repeat(usize::from(strength.percent()) / 10),
                    strength.percent(),
                    strength.color()
                ));
            }
        }

        if let Some(can_submit) = self.view.can_submit {
            lines.push(format!(
                "   {}",
                if can_submit { "Ready to register" } else { "Not ready to register" }
            ));
        }

        lines.push(String::new());
        lines.push(format!(" Already registered? go {}", Route::Login));
    }

    fn render_login(&self, lines: &mut Vec<String>) {
        lines.push(" Login".to_string());
        lines.push("   login <email> <password>".to_string());

        if let Some(error) = &self.view.login_error {
            lines.push(format!("   {}", error));
        }

        lines.push(String::new());
        lines.push(format!(" New here? go {}", Route::Register));
    }

    fn render_home(&self, lines: &mut Vec<String>) {
        let cart = commands::cart::get_cart(&self.cart);
        let favorites = commands::favorites::get_favorites(&self.favorites);
        let profile = commands::profile::get_profile(&self.session);

        lines.push(format!(
            " My Store                      favorites: {}   cart: {}",
            favorites.count, cart.item_count
        ));
        match (&profile.email, &profile.password) {
            (Some(email), Some(password)) => {
                lines.push(format!(" Logged in as {} (password: {})", email, password));
            }
            _ => lines.push(" Not logged in".to_string()),
        }

        lines.push(String::new());
        lines.push(" Products".to_string());
        for product in &self.config.catalog {
            let liked = favorites.items.iter().any(|f| f.id == product.id);
            lines.push(format!(
                "   [{}] {:<24} {:>10} {}",
                product.id,
                product.name,
                self.config.format_price(product.price),
                if liked { "<3" } else { "" }
            ));
        }

        lines.push(String::new());
        lines.push(" Cart".to_string());
        if cart.items.is_empty() {
            lines.push("   (empty)".to_string());
        }
        for item in &cart.items {
            lines.push(format!(
                "   [{}] {:<20} x{:<4} {:>10}",
                item.id,
                item.name,
                item.quantity,
                self.config.format_price(item.line_total())
            ));
        }
        lines.push(format!("   Total: {}", self.config.format_price(cart.total)));

        lines.push(String::new());
        lines.push(" Favorites".to_string());
        if favorites.items.is_empty() {
            lines.push("   (none)".to_string());
        }
        for item in &favorites.items {
            lines.push(format!(
                "   [{}] {:<24} {:>10}",
                item.id,
                item.name,
                self.config.format_price(item.price)
            ));
        }
    }
}
