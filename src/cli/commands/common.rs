use crate::cli::args::{
    CommonCommand, ExclusionCommand, NotificationCommand, RootFolderChoice, TagCommand,
};
use crate::cli::output::Printer;
use crate::cli::prompt;
use crate::error::Error;
use crate::media::{MediaClient, Paging};
use crate::models::{DiskSpace, Item, Items, QualityProfile, RootFolder, Schema};
use anyhow::Result;
use serde_json::Value;

pub(super) async fn run(api: &MediaClient, command: CommonCommand, printer: &Printer) -> Result<()> {
    match command {
        CommonCommand::Profiles => {
            let profiles = quality_profiles(api).await?;
            printer.profiles(&profiles)?;
        }
        CommonCommand::SystemStatus => {
            printer.value("System status", &api.get_system_status().await?)?
        }
        CommonCommand::DiskSpace => {
            let disks: Vec<DiskSpace> = decode_list(into_vec(api.get_disk_space().await?), "disk space")?;
            printer.disk_space(&disks)?
        }
        CommonCommand::RootFolders => printer.root_folders(api.get_root_folders().await?)?,
        CommonCommand::Queue {
            paging,
            hide_unknown,
        } => {
            let res = api.get_queue(&paging.over(Paging::queue()), !hide_unknown).await?;
            printer.value("Queue", &res)?;
        }
        CommonCommand::Delqueue { id, blocklist } => {
            printer.value("Result", &api.delete_queue(id, blocklist).await?)?
        }
        CommonCommand::Calendar { start, end } => {
            printer.value("Calendar", &api.get_calendar(start, end).await?)?
        }
        CommonCommand::Wanted { paging } => {
            let res = api.get_wanted(&paging.over(Paging::wanted()), None).await?;
            printer.value("Wanted", &res)?;
        }
        CommonCommand::History { paging } => {
            let res = api.get_history(&paging.over(Paging::history()), None).await?;
            printer.value("History", &res)?;
        }
        CommonCommand::Log { paging } => {
            let res = api.get_logs(&paging.over(Paging::logs()), None).await?;
            printer.value("Logs", &res)?;
        }
        CommonCommand::Blocklist { paging } => {
            let res = api.get_blocklist(&paging.over(Paging::blocklist()), None).await?;
            printer.value("Blocklist", &res)?;
        }
        CommonCommand::Delblocklist { id } => {
            printer.value("Result", &api.delete_blocklist(id).await?)?
        }
        CommonCommand::Status { id } => printer.value("Status", &api.get_command(id).await?)?,
        CommonCommand::RssSync => printer.value("Result", &api.sync_rss().await?)?,
        CommonCommand::Backup => printer.value("Backups", &api.get_backup().await?)?,
        CommonCommand::Tag { command } => tag(api, command, printer).await?,
        CommonCommand::Exclusion { command } => match command {
            ExclusionCommand::List { id } => {
                printer.value("Exclusions", &api.get_exclusion(id).await?)?
            }
            ExclusionCommand::Delete { id } => {
                printer.value("Result", &api.delete_exclusion(id).await?)?
            }
        },
        CommonCommand::Notification { command } => match command {
            NotificationCommand::List { id } => {
                printer.value("Notifications", &api.get_notification(id).await?)?
            }
            NotificationCommand::Delete { id } => {
                printer.value("Result", &api.delete_notification(id).await?)?
            }
        },
    }
    Ok(())
}

async fn tag(api: &MediaClient, command: TagCommand, printer: &Printer) -> Result<()> {
    let res = match command {
        TagCommand::List { id } => api.get_tag(id).await?,
        TagCommand::Detail { id } => api.get_tag_detail(id).await?,
        TagCommand::Create { label } => api.create_tag(&label).await?,
        TagCommand::Edit { id, label } => api.edit_tag(id, &label).await?,
        TagCommand::Delete { id } => api.delete_tag(id).await?,
    };
    printer.value("Tags", &res)
}

async fn quality_profiles(api: &MediaClient) -> Result<Vec<QualityProfile>> {
    let profiles = api.get_quality_profiles().await?;
    decode_list(profiles, "quality profiles")
}

async fn root_folders(api: &MediaClient) -> Result<Vec<RootFolder>> {
    let folders = api.get_root_folders().await?;
    decode_list(folders, "root folders")
}

fn into_vec(value: Value) -> Vec<Value> {
    match value {
        Value::Array(values) => values,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

fn decode_list<T: serde::de::DeserializeOwned>(values: Vec<Value>, what: &str) -> Result<Vec<T>> {
    serde_json::from_value(Value::Array(values))
        .map_err(|e| Error::client(format!("Unexpected {} from server: {}", what, e)).into())
}

/// Quality profile of an add command, asked for when not given.
pub(super) async fn choose_profile(api: &MediaClient, quality: Option<u32>) -> Result<u32> {
    if let Some(quality) = quality {
        return Ok(quality);
    }
    let profiles = quality_profiles(api).await?;
    prompt::select_profile(&profiles)
}

/// Root folder id of an add command; `Auto` asks for one.
pub(super) async fn choose_root_folder(api: &MediaClient, choice: RootFolderChoice) -> Result<u32> {
    match choice {
        RootFolderChoice::Default => Ok(0),
        RootFolderChoice::Id(id) => Ok(id),
        RootFolderChoice::Auto => {
            let folders = root_folders(api).await?;
            prompt::select_root_folder(&folders)
        }
    }
}

/// Lookup result of an add command given by keywords.
pub(super) fn choose_item<S: Schema>(terms: &str, choices: Option<Items<S>>) -> Result<Item<S>> {
    prompt::select_item(terms, choices)
}
