//! Interactive console.
//!
//! Reads one command per line from stdin and drives an [`AdminSession`].
//! Every error is reported and the loop carries on.

use std::io::{self, Write};

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use aachar_admin::forms::{FormField, LoginForm, SignupForm};
use aachar_admin::navigation::{Screen, ViewMode};
use aachar_admin::services::IdentityProvider;
use aachar_admin::{AdminSession, AppError};
use aachar_core::ProductId;

use crate::render;

const HELP: &str = "\
Commands:
  login <email> <password>
  signup <email> <password> <confirm> <name...>
  logout | whoami
  list | stats | view grid|list|toggle
  create | edit <id> | delete <id>
  set <field> <value...> | submit | cancel
  help | quit";

/// A console line that could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command: {0} (try help)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a product id: {0}")]
    BadId(String),
}

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Login { email: String, password: String },
    Signup {
        email: String,
        password: String,
        confirm: String,
        name: String,
    },
    Logout,
    WhoAmI,
    List,
    Stats,
    View(Option<ViewMode>),
    Create,
    Edit(ProductId),
    Delete(ProductId),
    Set { field: String, value: String },
    Submit,
    Cancel,
    Help,
    Quit,
}

impl ConsoleCommand {
    /// Parse one line. Blank lines yield `None`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for unknown commands or missing arguments.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "login" => match args.as_slice() {
                [email, password] => Self::Login {
                    email: (*email).to_owned(),
                    password: (*password).to_owned(),
                },
                _ => return Err(ParseError::Usage("login <email> <password>")),
            },
            "signup" => match args.as_slice() {
                [email, password, confirm, name @ ..] if !name.is_empty() => Self::Signup {
                    email: (*email).to_owned(),
                    password: (*password).to_owned(),
                    confirm: (*confirm).to_owned(),
                    name: name.join(" "),
                },
                _ => return Err(ParseError::Usage("signup <email> <password> <confirm> <name...>")),
            },
            "logout" => Self::Logout,
            "whoami" => Self::WhoAmI,
            "list" | "ls" => Self::List,
            "stats" => Self::Stats,
            "view" => match args.as_slice() {
                ["grid"] => Self::View(Some(ViewMode::Grid)),
                ["list" | "rows"] => Self::View(Some(ViewMode::List)),
                ["toggle"] | [] => Self::View(None),
                _ => return Err(ParseError::Usage("view grid|list|toggle")),
            },
            "create" | "new" => Self::Create,
            "edit" => Self::Edit(parse_id(&args, "edit <id>")?),
            "delete" | "rm" => Self::Delete(parse_id(&args, "delete <id>")?),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(f, v)| (f, v.trim()));
                if field.is_empty() {
                    return Err(ParseError::Usage("set <field> <value...>"));
                }
                Self::Set {
                    field: field.to_owned(),
                    value: value.to_owned(),
                }
            }
            "submit" | "save" => Self::Submit,
            "cancel" => Self::Cancel,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ParseError::Unknown(other.to_owned())),
        };
        Ok(Some(command))
    }
}

fn parse_id(args: &[&str], usage: &'static str) -> Result<ProductId, ParseError> {
    match args {
        [raw] => raw.parse().map_err(|_| ParseError::BadId((*raw).to_owned())),
        _ => Err(ParseError::Usage(usage)),
    }
}

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Console state: the session plus where output goes.
pub struct Console<P, W> {
    session: AdminSession<P>,
    out: W,
}

impl<P: IdentityProvider, W: Write> Console<P, W> {
    pub const fn new(session: AdminSession<P>, out: W) -> Self {
        Self { session, out }
    }

    pub const fn session(&self) -> &AdminSession<P> {
        &self.session
    }

    /// Run until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Only I/O failures on input or output.
    pub async fn run(&mut self, input: impl AsyncBufRead + Unpin) -> io::Result<()> {
        let mut lines = input.lines();
        writeln!(self.out, "Aachar admin console. Type help for commands.")?;

        loop {
            let prompt = self.prompt();
            write!(self.out, "{prompt}> ")?;
            self.out.flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = match ConsoleCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(self.out, "{e}")?;
                    continue;
                }
            };

            if let ConsoleCommand::Delete(id) = command {
                write!(self.out, "Delete {id}? [y/N] ")?;
                self.out.flush()?;
                let answer = lines.next_line().await?.unwrap_or_default();
                if !matches!(answer.trim(), "y" | "Y" | "yes") {
                    writeln!(self.out, "Kept.")?;
                    continue;
                }
            }

            if self.execute(command).await? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Run one command, reporting errors to the output.
    ///
    /// # Errors
    ///
    /// Only I/O failures on output.
    pub async fn execute(&mut self, command: ConsoleCommand) -> io::Result<Flow> {
        match self.dispatch(command).await {
            Ok(flow) => Ok(flow),
            Err(ConsoleError::Io(e)) => Err(e),
            Err(ConsoleError::App(e)) => {
                tracing::debug!(error = %e, "Command failed");
                match e.field_errors() {
                    Some(errors) => {
                        writeln!(self.out, "Please fix:")?;
                        render::field_errors(&mut self.out, errors)?;
                    }
                    None => writeln!(self.out, "error: {e}")?,
                }
                Ok(Flow::Continue)
            }
        }
    }

    async fn dispatch(&mut self, command: ConsoleCommand) -> Result<Flow, ConsoleError> {
        match command {
            ConsoleCommand::Login { email, password } => {
                writeln!(self.out, "Signing in...")?;
                self.out.flush()?;
                let identity = self.session.login(LoginForm::new(email, password)).await?;
                render::identity(&mut self.out, &identity)?;
                self.show_screen()?;
            }
            ConsoleCommand::Signup {
                email,
                password,
                confirm,
                name,
            } => {
                writeln!(self.out, "Creating account...")?;
                self.out.flush()?;
                let form = SignupForm::new(name, email, password, confirm);
                let identity = self.session.signup(form).await?;
                render::identity(&mut self.out, &identity)?;
                self.show_screen()?;
            }
            ConsoleCommand::Logout => {
                self.session.logout();
                writeln!(self.out, "Signed out.")?;
            }
            ConsoleCommand::WhoAmI => match self.session.identity() {
                Some(identity) => render::identity(&mut self.out, &identity)?,
                None => writeln!(self.out, "Not signed in.")?,
            },
            ConsoleCommand::List => {
                self.session.panel_mut()?.show_list();
                self.show_screen()?;
            }
            ConsoleCommand::Stats => {
                let stats = self.session.panel_mut()?.stats()?;
                writeln!(
                    self.out,
                    "total: {}, in stock: {}, featured: {}",
                    stats.total, stats.in_stock, stats.featured
                )?;
            }
            ConsoleCommand::View(mode) => {
                let panel = self.session.panel_mut()?;
                let mode = match mode {
                    Some(mode) => {
                        panel.set_view_mode(mode);
                        mode
                    }
                    None => panel.toggle_view_mode(),
                };
                writeln!(self.out, "View: {mode:?}")?;
                self.show_screen()?;
            }
            ConsoleCommand::Create => {
                self.session.panel_mut()?.show_create();
                self.show_screen()?;
            }
            ConsoleCommand::Edit(id) => {
                self.session.panel_mut()?.edit(id)?;
                self.show_screen()?;
            }
            ConsoleCommand::Delete(id) => {
                if self.session.panel_mut()?.delete(id)? {
                    writeln!(self.out, "Deleted.")?;
                } else {
                    writeln!(self.out, "Nothing to delete.")?;
                }
            }
            ConsoleCommand::Set { field, value } => {
                let field: FormField = field.parse().map_err(AppError::from)?;
                self.session.panel_mut()?.set_field(field, &value)?;
            }
            ConsoleCommand::Submit => {
                let product = self.session.panel_mut()?.submit()?;
                writeln!(self.out, "Saved {} ({})", product.name, product.id)?;
                self.show_screen()?;
            }
            ConsoleCommand::Cancel => {
                self.session.panel_mut()?.cancel()?;
                self.show_screen()?;
            }
            ConsoleCommand::Help => writeln!(self.out, "{HELP}")?,
            ConsoleCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn show_screen(&mut self) -> Result<(), ConsoleError> {
        let Some(panel) = self.session.panel() else {
            return Ok(());
        };
        match panel.navigator().screen() {
            Screen::Viewing => {
                let products = panel.products()?;
                let stats = panel.stats()?;
                render::product_list(&mut self.out, &products, stats, panel.navigator().view_mode())?;
            }
            Screen::Editing(form) => render::form(&mut self.out, form)?,
        }
        Ok(())
    }

    fn prompt(&self) -> &'static str {
        match self.session.panel() {
            None if self.session.is_loading() => "signing-in",
            None => "signed-out",
            Some(panel) if panel.navigator().is_editing() => "form",
            Some(_) => "catalog",
        }
    }
}

#[derive(Debug, Error)]
enum ConsoleError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    App(#[from] AppError),
}

/// Run the console on stdin/stdout.
///
/// # Errors
///
/// Only I/O failures.
pub async fn run<P: IdentityProvider>(session: AdminSession<P>) -> io::Result<()> {
    let mut console = Console::new(session, io::stdout());
    console.run(BufReader::new(tokio::io::stdin())).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::time::Duration;

    use aachar_admin::AdminConfig;
    use aachar_admin::services::MockIdentityProvider;

    use super::*;

    fn console() -> Console<MockIdentityProvider, Vec<u8>> {
        let config = AdminConfig {
            seed_catalog: false,
            ..AdminConfig::default()
        };
        let provider = MockIdentityProvider::new(Duration::from_millis(5), Duration::from_millis(5));
        Console::new(AdminSession::new(config, provider), Vec::new())
    }

    fn output(console: &Console<MockIdentityProvider, Vec<u8>>) -> String {
        String::from_utf8(console.out.clone()).unwrap()
    }

    #[test]
    fn test_parse_login() {
        assert_eq!(
            ConsoleCommand::parse("login admin@aachar.in pw").unwrap(),
            Some(ConsoleCommand::Login {
                email: "admin@aachar.in".to_string(),
                password: "pw".to_string(),
            })
        );
        assert!(matches!(
            ConsoleCommand::parse("login admin@aachar.in"),
            Err(ParseError::Usage(_))
        ));
    }

    #[test]
    fn test_parse_signup_name_with_spaces() {
        let command = ConsoleCommand::parse("signup p@aachar.in pw pw Priya Sharma").unwrap();
        assert!(matches!(
            command,
            Some(ConsoleCommand::Signup { name, .. }) if name == "Priya Sharma"
        ));
    }

    #[test]
    fn test_parse_set_keeps_value_spaces() {
        assert_eq!(
            ConsoleCommand::parse("set ingredients Mango, Salt,  , Chili").unwrap(),
            Some(ConsoleCommand::Set {
                field: "ingredients".to_string(),
                value: "Mango, Salt,  , Chili".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_blank_and_unknown() {
        assert_eq!(ConsoleCommand::parse("   ").unwrap(), None);
        assert!(matches!(
            ConsoleCommand::parse("frobnicate"),
            Err(ParseError::Unknown(_))
        ));
        assert!(matches!(
            ConsoleCommand::parse("edit 42"),
            Err(ParseError::BadId(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_catalog_commands_require_sign_in() {
        let mut console = console();
        console.execute(ConsoleCommand::List).await.unwrap();
        assert!(output(&console).contains("error: Unauthorized"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scripted_session() {
        let mut console = console();
        let script = "\
login admin@aachar.in pw
create
set name Mango Pickle
submit
set description Spicy
set price 150
set category Fruit
set ingredients Mango, Salt, Chili
set spice_level Hot
set weight 500g
submit
quit
";
        console.run(script.as_bytes()).await.unwrap();

        let text = output(&console);
        assert!(text.contains("Please fix:"));
        assert!(text.contains("Saved Mango Pickle"));

        let products = console.session().panel().unwrap().products().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].ingredients, vec!["Mango", "Salt", "Chili"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_needs_confirmation() {
        let mut console = console();
        console
            .run("login admin@aachar.in pw\ncreate\nset name A\nset description B\nset price 1\nset category C\nset ingredients D\nset weight 1g\nsubmit\n".as_bytes())
            .await
            .unwrap();
        let id = console.session().panel().unwrap().products().unwrap()[0].id;

        console
            .run(format!("delete {id}\nn\n").as_bytes())
            .await
            .unwrap();
        assert_eq!(console.session().panel().unwrap().products().unwrap().len(), 1);

        console
            .run(format!("delete {id}\ny\n").as_bytes())
            .await
            .unwrap();
        assert!(console.session().panel().unwrap().products().unwrap().is_empty());
    }
}
