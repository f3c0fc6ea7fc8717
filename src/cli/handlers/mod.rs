use std::io::Write;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use tracing::debug;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{read_config, resolve_data_dir};
use crate::io::state_io::{FileStorage, load_state, persist};
use crate::model::config::Config;
use crate::model::store::TaskStore;
use crate::model::task::{KanbanStatus, Priority, TaskPatch};
use crate::model::view::{SortKey, StatusFilter, View};
use crate::ops::filter::view_task_count;
use crate::ops::pomodoro::{self, PomodoroMode, Timer, format_clock};
use crate::ops::quick_add::{QuickAddForm, clean_title, quick_add};
use crate::ops::task_ops;
use crate::ops::view_data::{Selection, ViewData, view_data};
use crate::parse::parse_numeric_date;
use crate::util::dates::{self, days_after};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a command works against, loaded once per invocation
struct Session {
    storage: FileStorage,
    store: TaskStore,
    config: Config,
    today: NaiveDate,
    json: bool,
}

impl Session {
    fn open(cli: &Cli) -> Result<Session, Box<dyn std::error::Error>> {
        let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
        let today = match &cli.today {
            Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| format!("invalid --today date '{}' (expected YYYY-MM-DD)", s))?,
            None => dates::today(),
        };
        let config = read_config(&data_dir)?;
        debug!(dir = %data_dir.display(), %today, "opening task state");
        let storage = FileStorage::new(data_dir);
        let store = load_state(&storage, today);
        Ok(Session {
            storage,
            store,
            config,
            today,
            json: cli.json,
        })
    }

    fn save(&mut self) {
        persist(&mut self.storage, &self.store);
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let mut session = Session::open(&cli)?;

    match cli.command {
        None => cmd_show(&session, ShowArgs::default()),
        Some(cmd) => match cmd {
            // Read commands
            Commands::Show(args) => cmd_show(&session, args),
            Commands::Get(args) => cmd_get(&session, args),
            Commands::Lists => cmd_lists(&session),
            Commands::Tags => cmd_tags(&session),

            // Write commands
            Commands::Add(args) => cmd_add(&mut session, args),
            Commands::View(args) => cmd_view(&mut session, args),
            Commands::Done(args) => cmd_done(&mut session, args),
            Commands::Status(args) => cmd_status(&mut session, args),
            Commands::Edit(args) => cmd_edit(&mut session, args),
            Commands::Rm(args) => cmd_rm(&mut session, args),
            Commands::Mv(args) => cmd_mv(&mut session, args),
            Commands::Pomodoro(args) => cmd_pomodoro(&mut session, args),
        },
    }
}

/// Lookup misses aren't errors: report and exit cleanly
fn report_not_found(id: &str) {
    eprintln!("task not found: {}", id);
}

/// Due dates on the command line: `today`, `tomorrow`, or any numeric form
/// the quick-add parser accepts
fn parse_due(s: &str, today: NaiveDate) -> Result<NaiveDate, String> {
    match s.to_ascii_lowercase().as_str() {
        "today" => Ok(today),
        "tomorrow" => Ok(days_after(today, 1)),
        _ => parse_numeric_date(s.trim(), today).ok_or_else(|| format!("invalid date '{}'", s)),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a task after a mutation, in the requested format
fn print_task(session: &Session, id: &str) -> CmdResult {
    let Some(task) = session.store.find_task(id) else {
        return Ok(());
    };
    if session.json {
        print_json(task)
    } else {
        println!("{}", format_task_line(task, session.today));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_show(session: &Session, args: ShowArgs) -> CmdResult {
    let store = &session.store;
    let view = match args.view {
        Some(s) => s.parse::<View>()?,
        None => store.current_view.clone(),
    };
    let filter = match args.filter {
        Some(s) => s.parse::<StatusFilter>()?,
        None => session.config.defaults.filter,
    };
    let sort = match args.sort {
        Some(s) => s.parse::<SortKey>()?,
        None => session.config.defaults.sort,
    };
    let month = match args.month {
        Some(m) => Some(
            NaiveDate::parse_from_str(&format!("{}-01", m), "%Y-%m-%d")
                .map_err(|_| format!("invalid month '{}' (expected YYYY-MM)", m))?,
        ),
        None => None,
    };

    let sel = Selection {
        view,
        filter,
        sort,
        today: session.today,
        month,
    };
    let data = view_data(store, &sel);
    let title = sel.view.title(&store.lists);
    let count = view_task_count(&store.tasks, &sel.view, session.today);

    if session.json {
        let completed_pomodoros = match data {
            ViewData::Pomodoro { completed } => Some(completed),
            _ => None,
        };
        return print_json(&ViewJson {
            view: sel.view.to_string(),
            sections: sections(&data, &title),
            title,
            count,
            completed_pomodoros,
        });
    }

    println!("{}", format_view_header(&title, count));
    if let ViewData::Pomodoro { completed } = data {
        for line in format_pomodoro(completed, &session.config.pomodoro) {
            println!("{}", line);
        }
        return Ok(());
    }
    for line in format_view(&data, session.today) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_get(session: &Session, args: GetArgs) -> CmdResult {
    let Some(task) = session.store.find_task(&args.id) else {
        report_not_found(&args.id);
        return Ok(());
    };
    if session.json {
        return print_json(task);
    }
    for line in format_task_detail(task, &session.store, session.today) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_lists(session: &Session) -> CmdResult {
    if session.json {
        return print_json(&session.store.lists);
    }
    for list in &session.store.lists {
        println!("{}", format_list_line(list));
    }
    Ok(())
}

fn cmd_tags(session: &Session) -> CmdResult {
    if session.json {
        return print_json(&session.store.tags);
    }
    for tag in &session.store.tags {
        println!("{}", format_tag_line(tag));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(session: &mut Session, args: AddArgs) -> CmdResult {
    let today = session.today;
    let mut form = QuickAddForm::for_view(args.text.join(" "), &session.store.current_view);
    if let Some(ref due) = args.due {
        form.due_date = Some(parse_due(due, today)?);
    }
    if let Some(ref priority) = args.priority {
        form.priority = priority.parse::<Priority>()?;
    }
    if let Some(list) = args.list {
        form.list = list;
    }
    form.tags = args.tags;
    if let Some(description) = args.description {
        form.description = description;
    }
    form.details_open = args.details;

    let id = quick_add(&mut session.store, form, today, Utc::now().naive_utc())?;
    session.save();

    if session.json {
        print_task(session, &id)
    } else {
        println!("{}", id);
        Ok(())
    }
}

fn cmd_view(session: &mut Session, args: ViewArgs) -> CmdResult {
    let view: View = args.view.parse()?;
    task_ops::set_view(&mut session.store, view);
    session.save();
    if session.json {
        return print_json(&serde_json::json!({ "view": session.store.current_view }));
    }
    println!("view: {}", session.store.current_view);
    Ok(())
}

fn cmd_done(session: &mut Session, args: DoneArgs) -> CmdResult {
    if !task_ops::toggle_completion(&mut session.store, &args.id) {
        report_not_found(&args.id);
        return Ok(());
    }
    session.save();
    print_task(session, &args.id)
}

fn cmd_status(session: &mut Session, args: StatusArgs) -> CmdResult {
    let status: KanbanStatus = args.status.parse()?;
    if !task_ops::set_status(&mut session.store, &args.id, status) {
        report_not_found(&args.id);
        return Ok(());
    }
    session.save();
    print_task(session, &args.id)
}

fn cmd_edit(session: &mut Session, args: EditArgs) -> CmdResult {
    let today = session.today;
    let mut patch = TaskPatch {
        title: args.title.as_deref().map(clean_title).transpose()?,
        description: args.description,
        list: args.list,
        ..Default::default()
    };
    if let Some(ref due) = args.due {
        patch.due_date = Some(Some(parse_due(due, today)?));
    } else if args.clear_due {
        patch.due_date = Some(None);
    }
    if let Some(ref priority) = args.priority {
        patch.priority = Some(priority.parse::<Priority>()?);
    }
    if !args.tags.is_empty() {
        patch.tags = Some(args.tags);
    }
    if patch.is_empty() {
        return Err("nothing to change (pass --title, --due, --priority, ...)".into());
    }

    if !task_ops::update_task(&mut session.store, &args.id, patch) {
        report_not_found(&args.id);
        return Ok(());
    }
    session.save();
    print_task(session, &args.id)
}

fn cmd_rm(session: &mut Session, args: RmArgs) -> CmdResult {
    if !task_ops::delete_task(&mut session.store, &args.id) {
        report_not_found(&args.id);
        return Ok(());
    }
    session.save();
    if !session.json {
        println!("deleted {}", args.id);
    }
    Ok(())
}

fn cmd_mv(session: &mut Session, args: MvArgs) -> CmdResult {
    for id in [&args.id, &args.over_id] {
        if session.store.find_task(id).is_none() {
            report_not_found(id);
            return Ok(());
        }
    }
    if task_ops::move_task(&mut session.store, &args.id, &args.over_id) {
        session.save();
    }
    if session.json {
        let order: Vec<&str> = session.store.tasks.iter().map(|t| t.id.as_str()).collect();
        return print_json(&order);
    }
    Ok(())
}

fn cmd_pomodoro(session: &mut Session, args: PomodoroArgs) -> CmdResult {
    if let Some(ref mode) = args.complete {
        let mode: PomodoroMode = mode.parse()?;
        pomodoro::complete_session(&mut session.store, mode);
        session.save();
    } else if let Some(ref mode) = args.start {
        let mode: PomodoroMode = mode.parse()?;
        run_timer(session, mode)?;
    }

    if session.json {
        return print_json(&pomodoro_to_json(
            session.store.completed_pomodoros,
            &session.config.pomodoro,
        ));
    }
    for line in format_pomodoro(session.store.completed_pomodoros, &session.config.pomodoro) {
        println!("{}", line);
    }
    Ok(())
}

/// Count a session down on stderr, one tick per second, then record it
fn run_timer(session: &mut Session, mode: PomodoroMode) -> CmdResult {
    let mut timer = Timer::new(mode, &session.config.pomodoro);
    timer.start();

    let mut err = std::io::stderr();
    while timer.running {
        write!(
            err,
            "\r{} {}",
            format_clock(timer.remaining_secs),
            timer.status_text()
        )?;
        err.flush()?;
        std::thread::sleep(Duration::from_secs(1));
        timer.tick(1);
    }
    writeln!(err, "\r{}          ", timer.status_text())?;

    pomodoro::complete_session(&mut session.store, mode);
    session.save();
    Ok(())
}
