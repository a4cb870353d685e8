use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use shoplist::config::Config;
use shoplist::logging::init_tracing;
use shoplist::persist::FileBlobStore;
use shoplist::session::Session;
use shoplist::shopping::{query, ShoppingList, ShoppingState};

#[derive(Debug, Parser)]
#[command(name = "shoplist", version, about = "Manage shopping lists stored on this device")]
struct Cli {
    /// Path to config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Lists and items can be referred to by id or by exact name.
#[derive(Debug, Subcommand)]
enum Command {
    /// Show all lists with their progress
    Lists,
    /// Show the items of one list
    Show { list: String },
    AddList { name: String },
    RenameList { list: String, name: String },
    DeleteList { list: String },
    AddItem {
        list: String,
        name: String,
        quantity: String,
    },
    EditItem {
        list: String,
        item: String,
        name: String,
        quantity: String,
    },
    /// Flip the purchased flag of an item
    Toggle { list: String, item: String },
    DeleteItem { list: String, item: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    init_tracing(&config.logging.level);

    let blob = Arc::new(FileBlobStore::new(config.storage.resolved_data_dir()));
    let mut session = Session::open(blob, &config.storage.key).await;
    if let Some(e) = session.load_error() {
        eprintln!("Warning: stored lists could not be read and were ignored: {e}");
    }

    let outcome = run(&mut session, cli.command);
    let saved = session.close().await;

    outcome?;
    saved.context("Failed to save shopping lists")
}

fn run(session: &mut Session, command: Command) -> Result<()> {
    match command {
        Command::Lists => print_lists(session.store().state()),
        Command::Show { list } => {
            let list_id = resolve_list(session.store().state(), &list)?;
            print_list(session.store().state(), &list_id);
        }
        Command::AddList { name } => {
            let id = session.store_mut().create_list(&name)?;
            println!("Created list {id}");
        }
        Command::RenameList { list, name } => {
            let list_id = resolve_list(session.store().state(), &list)?;
            session.store_mut().rename_list(&list_id, &name);
            print_list(session.store().state(), &list_id);
        }
        Command::DeleteList { list } => {
            let list_id = resolve_list(session.store().state(), &list)?;
            session.store_mut().delete_list(&list_id);
            print_lists(session.store().state());
        }
        Command::AddItem {
            list,
            name,
            quantity,
        } => {
            let list_id = resolve_list(session.store().state(), &list)?;
            session.store_mut().add_item(&list_id, &name, &quantity)?;
            print_list(session.store().state(), &list_id);
        }
        Command::EditItem {
            list,
            item,
            name,
            quantity,
        } => {
            let (list_id, item_id) = resolve_item(session.store().state(), &list, &item)?;
            session
                .store_mut()
                .edit_item(&list_id, &item_id, &name, &quantity);
            print_list(session.store().state(), &list_id);
        }
        Command::Toggle { list, item } => {
            let (list_id, item_id) = resolve_item(session.store().state(), &list, &item)?;
            session.store_mut().toggle_purchased(&list_id, &item_id);
            print_list(session.store().state(), &list_id);
        }
        Command::DeleteItem { list, item } => {
            let (list_id, item_id) = resolve_item(session.store().state(), &list, &item)?;
            session.store_mut().delete_item(&list_id, &item_id);
            print_list(session.store().state(), &list_id);
        }
    }
    Ok(())
}

fn find_list<'a>(state: &'a ShoppingState, reference: &str) -> Option<&'a ShoppingList> {
    query::list(state, reference).or_else(|| {
        query::all_lists(state)
            .iter()
            .find(|list| list.name == reference)
    })
}

fn resolve_list(state: &ShoppingState, reference: &str) -> Result<String> {
    match find_list(state, reference) {
        Some(list) => Ok(list.id.clone()),
        None => bail!("No list with id or name '{reference}'"),
    }
}

fn resolve_item(state: &ShoppingState, list: &str, reference: &str) -> Result<(String, String)> {
    let Some(found) = find_list(state, list) else {
        bail!("No list with id or name '{list}'");
    };
    let item = found
        .item(reference)
        .or_else(|| found.items.iter().find(|item| item.name == reference));
    match item {
        Some(item) => Ok((found.id.clone(), item.id.clone())),
        None => bail!("No item with id or name '{reference}' in list '{}'", found.name),
    }
}

fn print_lists(state: &ShoppingState) {
    let lists = query::all_lists(state);
    if lists.is_empty() {
        println!("No shopping lists yet.");
        return;
    }
    for list in lists {
        let progress = query::progress(list);
        println!(
            "{}  {} ({}/{})",
            list.id, list.name, progress.purchased, progress.total
        );
    }
}

fn print_list(state: &ShoppingState, list_id: &str) {
    let Some(list) = query::list(state, list_id) else {
        return;
    };
    println!("{} ({})", list.name, list.id);
    for item in &list.items {
        let mark = if item.purchased { "x" } else { " " };
        println!("  [{mark}] {} x{}  {}", item.name, item.quantity, item.id);
    }
}
