use clap::{Args, Parser, Subcommand};
use vport_admin::config::{ClientConfig, ConfigError};
use vport_admin::controller::door::{self, DEFAULT_OPEN_REASON};
use vport_admin::controller::password::{PasswordError, change_password};
use vport_admin::controller::tags::{TagError, TagForm, register_tag};
use vport_admin::controller::users::{ActionOutcome, LoadOutcome, UserListController};
use vport_admin::net::api::{ApiError, HttpClient};
use vport_admin::state::access::{AccessEffect, AccessState};
use vport_admin::state::form::{DEFAULT_TIPO_ID, UserForm};
use vport_admin::state::page::PageSize;
use vport_admin::state::password::{PasswordChange, StrengthLevel};
use vport_admin::terminal::{self, TerminalView, format_access_log, format_effect};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Tag(#[from] TagError),
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
    #[error("user {0} is not on the listed page; narrow it with --search or --page")]
    UserNotFound(String),
    #[error("cancelled")]
    Cancelled,
}

#[derive(Parser, Debug)]
#[command(name = "vport", about = "vport access-control admin CLI")]
struct Cli {
    /// Overrides VPORT_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Session cookie value; overrides VPORT_SESSION.
    #[arg(long, global = true)]
    session: Option<String>,

    /// Door API token; overrides VPORT_API_TOKEN.
    #[arg(long, global = true)]
    token: Option<String>,

    /// Answer yes to every confirmation prompt.
    #[arg(long, short = 'y', global = true, default_value_t = false)]
    yes: bool,

    #[arg(long, short = 'v', global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Users(UsersCommand),
    /// Change the admin password.
    Password {
        #[arg(long = "new")]
        new_pwd: String,
        #[arg(long)]
        confirm: String,
    },
    Tag(TagCommand),
    Door(DoorCommand),
    /// Print dashboard events until the server closes the stream.
    Events,
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = PageSize::TwentyFive)]
        per_page: PageSize,
        #[arg(long)]
        search: Option<String>,
    },
    Add {
        /// Tag UID; leave empty to let the server assign one.
        #[arg(long, default_value = "")]
        id: String,
        #[command(flatten)]
        fields: UserFields,
    },
    Edit {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        fields: UserFields,
    },
    Delete {
        id: String,
    },
}

/// Field values for add/edit; unset fields keep the form's value.
#[derive(Args, Debug, Default)]
struct UserFields {
    #[arg(long)]
    nombre: Option<String>,
    #[arg(long)]
    ap: Option<String>,
    #[arg(long)]
    am: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    pwd: Option<String>,
    #[arg(long)]
    cell: Option<String>,
    #[arg(long)]
    tipo: Option<u32>,
    #[arg(long)]
    operador: Option<bool>,
    #[arg(long)]
    activo: Option<bool>,
}

impl UserFields {
    fn apply(self, form: &mut UserForm) {
        let text_fields = [
            (self.nombre, &mut form.nombre),
            (self.ap, &mut form.ap),
            (self.am, &mut form.am),
            (self.email, &mut form.email),
            (self.pwd, &mut form.pwd),
            (self.cell, &mut form.cell),
        ];
        for (value, slot) in text_fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(tipo) = self.tipo {
            form.tipo_id = tipo;
        }
        if let Some(operador) = self.operador {
            form.operador = operador;
        }
        if let Some(activo) = self.activo {
            form.activo = activo;
        }
    }
}

#[derive(Args, Debug)]
struct TagCommand {
    #[command(subcommand)]
    command: TagSubcommand,
}

#[derive(Subcommand, Debug)]
enum TagSubcommand {
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        nombre: String,
        #[arg(long, default_value_t = DEFAULT_TIPO_ID)]
        level: u32,
    },
}

#[derive(Args, Debug)]
struct DoorCommand {
    #[command(subcommand)]
    command: DoorSubcommand,
}

#[derive(Subcommand, Debug)]
enum DoorSubcommand {
    Open {
        #[arg(long, default_value = DEFAULT_OPEN_REASON)]
        reason: String,
    },
    Snapshot,
    Talk,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(level).init();

    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if cli.session.is_some() {
        config.session = cli.session;
    }
    if cli.token.is_some() {
        config.api_token = cli.token;
    }
    tracing::debug!(base_url = %config.base_url, "client configured");

    let login_path = config.login_path.clone();
    let client = HttpClient::new(config)?;
    let view = TerminalView::new(cli.yes);

    match cli.command {
        Command::Users(users) => {
            let controller = UserListController::new(client, view).with_login_path(login_path);
            run_users(&controller, users).await
        }
        Command::Password { new_pwd, confirm } => run_password(&client, &PasswordChange::new(new_pwd, confirm)).await,
        Command::Tag(tag) => run_tag(&client, tag).await,
        Command::Door(door) => run_door(&client, door).await,
        Command::Events => run_events(&client).await,
    }
}

async fn run_users(controller: &UserListController<HttpClient, TerminalView>, users: UsersCommand) -> Result<(), CliError> {
    match users.command {
        UsersSubcommand::List { page, per_page, search } => {
            controller.set_filters(per_page, search.as_deref().unwrap_or_default());
            check_load(controller.load_page(page).await)
        }
        UsersSubcommand::Add { id, fields } => {
            if fields.nombre.as_deref().is_none_or(str::is_empty) {
                return Err(CliError::MissingField("nombre"));
            }
            let mut form = UserForm { id, ..UserForm::new() };
            fields.apply(&mut form);
            check_action(controller.submit_user(form).await)
        }
        UsersSubcommand::Edit { id, page, search, fields } => {
            controller.set_filters(PageSize::default(), search.as_deref().unwrap_or_default());
            check_load(controller.load_page(page).await)?;
            controller.edit_user(&id).ok_or_else(|| CliError::UserNotFound(id.clone()))?;
            let mut form = controller.form();
            fields.apply(&mut form);
            check_action(controller.submit_user(form).await)
        }
        UsersSubcommand::Delete { id } => check_action(controller.delete_user(&id).await),
    }
}

fn check_load(outcome: LoadOutcome) -> Result<(), CliError> {
    match outcome {
        LoadOutcome::Rendered | LoadOutcome::Stale | LoadOutcome::Ignored => Ok(()),
        LoadOutcome::Redirected => Err(ApiError::Unauthorized.into()),
        LoadOutcome::Failed(err) => Err(err.into()),
    }
}

fn check_action(outcome: ActionOutcome) -> Result<(), CliError> {
    match outcome {
        ActionOutcome::Done => Ok(()),
        ActionOutcome::Cancelled => Err(CliError::Cancelled),
        ActionOutcome::Redirected => Err(ApiError::Unauthorized.into()),
        ActionOutcome::Failed(err) => Err(err.into()),
    }
}

async fn run_password(client: &HttpClient, change: &PasswordChange) -> Result<(), CliError> {
    let strength = change.strength();
    let label = match strength.level() {
        StrengthLevel::Weak => "débil",
        StrengthLevel::Fair => "media",
        StrengthLevel::Strong => "fuerte",
    };
    eprintln!("fortaleza: {}% ({label})", strength.percent());

    let message = change_password(client, change).await?;
    println!("✅ {message}");
    Ok(())
}

async fn run_tag(client: &HttpClient, tag: TagCommand) -> Result<(), CliError> {
    match tag.command {
        TagSubcommand::Add { id, nombre, level } => {
            let form = TagForm::new(id, nombre).with_level(level.to_string());
            let message = register_tag(client, &form).await?;
            println!("✅ Tarjeta agregada con éxito! Mensaje: {message}");
            Ok(())
        }
    }
}

async fn run_door(client: &HttpClient, command: DoorCommand) -> Result<(), CliError> {
    let notice = match command.command {
        DoorSubcommand::Open { reason } => door::open_door(client, &reason).await?,
        DoorSubcommand::Snapshot => door::take_snapshot(client).await.notice(),
        DoorSubcommand::Talk => door::toggle_talk(client).await,
    };
    println!("{}", notice.text);
    Ok(())
}

async fn run_events(client: &HttpClient) -> Result<(), CliError> {
    let mut state = AccessState::new();
    client
        .listen_events(|event| {
            for effect in state.apply(&event, time::OffsetDateTime::now_utc()) {
                if let AccessEffect::Play(sound) = effect {
                    terminal::play(sound);
                } else if let Some(line) = format_effect(&effect) {
                    println!("{line}");
                }
            }
        })
        .await?;
    eprintln!("event stream closed");
    if state.log_open() {
        for line in format_access_log(state.log()) {
            println!("{line}");
        }
    }
    Ok(())
}
