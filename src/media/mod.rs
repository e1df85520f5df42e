//! Endpoints shared by the movie and series servers.

mod layout;
mod paging;

pub use layout::{ApiLayout, Service};
pub use paging::Paging;

use crate::error::{Error, Result};
use crate::http::{Params, Transport};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

#[cfg(windows)]
const INVALID_PATH_CHARS: &str = "<>:\"/\\|?*";
#[cfg(not(windows))]
const INVALID_PATH_CHARS: &str = "/";

/// Resource-oriented client on top of a [`Transport`].
///
/// Service clients wrap one of these with their own [`ApiLayout`].
pub struct MediaClient {
    transport: Box<dyn Transport>,
    layout: ApiLayout,
    default_root_folder_id: u32,
}

impl MediaClient {
    pub fn new(transport: Box<dyn Transport>, layout: ApiLayout) -> Self {
        Self {
            transport,
            layout,
            default_root_folder_id: 0,
        }
    }

    pub fn layout(&self) -> &ApiLayout {
        &self.layout
    }

    pub fn service(&self) -> Service {
        self.layout.service
    }

    pub fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Root folder used by [`MediaClient::build_item_path`] when none is requested.
    pub fn default_root_folder_id(&self) -> u32 {
        self.default_root_folder_id
    }

    pub fn set_default_root_folder_id(&mut self, id: u32) {
        self.default_root_folder_id = id;
    }

    pub fn close(&mut self) {
        self.transport.close();
    }

    /// Events between `start` and `end`. Without both dates the server
    /// returns today and tomorrow.
    #[instrument(skip(self))]
    pub async fn get_calendar(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Value> {
        let mut params = Params::new();
        if let (Some(start), Some(end)) = (start, end) {
            params.insert("start".to_string(), json!(start.format("%Y-%m-%d").to_string()));
            params.insert("end".to_string(), json!(end.format("%Y-%m-%d").to_string()));
        }
        self.transport.get(self.layout.calendar, Some(&params)).await
    }

    /// Status of one command, or of all running commands.
    pub async fn get_command(&self, command_id: Option<u64>) -> Result<Value> {
        let path = path_with_id(self.layout.command, command_id);
        self.transport.get(&path, None).await
    }

    #[instrument(skip(self))]
    pub async fn send_command(&self, command: &Value) -> Result<Value> {
        self.transport.post(self.layout.command, Some(command)).await
    }

    /// Command `name` targeting one item, or all of them when `item_id` is `None`.
    pub(crate) async fn item_command(&self, name: &str, item_id: Option<u64>) -> Result<Value> {
        let mut command = json!({ "name": name });
        if let Some(id) = item_id {
            command[self.layout.item_id_param] = json!(id);
        }
        self.send_command(&command).await
    }

    pub async fn sync_rss(&self) -> Result<Value> {
        self.send_command(&json!({"name": "RssSync"})).await
    }

    /// Run the `RenameFiles` command; `extra` is merged into the command body.
    pub async fn rename_files(&self, file_ids: &[u64], extra: Params) -> Result<Value> {
        let mut command = Params::new();
        command.insert("name".to_string(), json!("RenameFiles"));
        command.insert("files".to_string(), json!(file_ids));
        command.extend(extra);
        self.send_command(&Value::Object(command)).await
    }

    /// Renames the server would apply to the files of an item.
    pub async fn get_rename(&self, item_id: u64) -> Result<Value> {
        let mut params = Params::new();
        params.insert(self.layout.item_id_param.to_string(), json!(item_id));
        self.transport.get(self.layout.rename, Some(&params)).await
    }

    pub async fn get_disk_space(&self) -> Result<Value> {
        self.transport.get(self.layout.disk_space, None).await
    }

    pub async fn get_system_status(&self) -> Result<Value> {
        self.transport.get(self.layout.system_status, None).await
    }

    pub async fn get_backup(&self) -> Result<Value> {
        self.transport.get(self.layout.system_backup, None).await
    }

    #[instrument(skip(self))]
    pub async fn get_root_folders(&self) -> Result<Vec<Value>> {
        let res = self.transport.get(self.layout.root_folder, None).await?;
        into_list(res, self.layout.root_folder)
    }

    #[instrument(skip(self))]
    pub async fn get_quality_profiles(&self) -> Result<Vec<Value>> {
        let res = self.transport.get(self.layout.quality_profile, None).await?;
        into_list(res, self.layout.quality_profile)
    }

    /// One item, or the whole collection when `item_id` is `None`.
    #[instrument(skip(self))]
    pub async fn get_item(&self, item_id: Option<u64>) -> Result<Value> {
        let path = path_with_id(self.layout.item, item_id);
        self.transport.get(&path, None).await
    }

    #[instrument(skip(self))]
    pub async fn lookup_item(&self, term: &str) -> Result<Value> {
        let mut params = Params::new();
        params.insert("term".to_string(), json!(term));
        self.transport.get(self.layout.item_lookup, Some(&params)).await
    }

    /// Add a new item. The body must already hold every field the server requires.
    #[instrument(skip(self, body))]
    pub async fn add_item(&self, body: &Value) -> Result<Value> {
        self.transport.post(self.layout.item, Some(body)).await
    }

    /// Delete an item. `options` are merged over `deleteFiles` and win on collision.
    #[instrument(skip(self))]
    pub async fn delete_item(
        &self,
        item_id: u64,
        delete_files: bool,
        options: &Params,
    ) -> Result<Value> {
        let params = delete_params(delete_files, options);
        let path = format!("{}/{}", self.layout.item, item_id);
        self.transport.delete(&path, Some(&params)).await
    }

    /// Replace an item with `body`. Last writer wins.
    #[instrument(skip(self, body))]
    pub async fn edit_item(&self, body: &Value, params: Option<&Params>) -> Result<Value> {
        self.transport.put(self.layout.item, Some(body), params).await
    }

    #[instrument(skip(self))]
    pub async fn get_queue(&self, paging: &Paging, include_unknown: bool) -> Result<Value> {
        let mut options = Params::new();
        options.insert(
            self.layout.queue_unknown_items_param.to_string(),
            json!(include_unknown),
        );
        let params = paging.to_params("sortDirection", Some(&options));
        self.transport.get(self.layout.queue, Some(&params)).await
    }

    /// Remove an item from the queue and the download client.
    pub async fn delete_queue(&self, item_id: u64, blocklist: bool) -> Result<Value> {
        let mut params = Params::new();
        if blocklist {
            params.insert("blacklist".to_string(), json!(true));
        }
        let path = format!("{}/{}", self.layout.queue, item_id);
        self.transport.delete(&path, Some(&params)).await
    }

    pub async fn get_history(&self, paging: &Paging, options: Option<&Params>) -> Result<Value> {
        let params = paging.to_params("sortDir", options);
        self.transport.get(self.layout.history, Some(&params)).await
    }

    pub async fn get_logs(&self, paging: &Paging, options: Option<&Params>) -> Result<Value> {
        let params = paging.to_params("sortDir", options);
        self.transport.get(self.layout.log, Some(&params)).await
    }

    pub async fn get_wanted(&self, paging: &Paging, options: Option<&Params>) -> Result<Value> {
        let params = paging.to_params("sortDir", options);
        self.transport
            .get(self.layout.wanted_missing, Some(&params))
            .await
    }

    pub async fn get_blocklist(&self, paging: &Paging, options: Option<&Params>) -> Result<Value> {
        let params = paging.to_params("sortDirection", options);
        self.transport.get(self.layout.blocklist, Some(&params)).await
    }

    /// Remove one release from the blocklist, or all of them when `item_id` is `None`.
    pub async fn delete_blocklist(&self, item_id: Option<u64>) -> Result<Value> {
        match item_id {
            Some(id) => {
                let mut params = Params::new();
                params.insert("id".to_string(), json!(id));
                self.transport
                    .delete(self.layout.blocklist, Some(&params))
                    .await
            }
            None => {
                let path = format!("{}/bulk", self.layout.blocklist);
                self.transport.delete(&path, None).await
            }
        }
    }

    pub async fn get_notification(&self, item_id: Option<u64>) -> Result<Value> {
        let path = path_with_id(self.layout.notification, item_id);
        self.transport.get(&path, None).await
    }

    pub async fn delete_notification(&self, item_id: u64) -> Result<Value> {
        let path = format!("{}/{}", self.layout.notification, item_id);
        self.transport.delete(&path, None).await
    }

    pub async fn put_notification(&self, item_id: u64, notification: &Value) -> Result<Value> {
        let path = format!("{}/{}", self.layout.notification, item_id);
        self.transport.put(&path, Some(notification), None).await
    }

    pub async fn get_tag(&self, item_id: Option<u64>) -> Result<Value> {
        let path = path_with_id(self.layout.tag, item_id);
        self.transport.get(&path, None).await
    }

    pub async fn get_tag_detail(&self, item_id: Option<u64>) -> Result<Value> {
        let base = format!("{}/detail", self.layout.tag);
        let path = path_with_id(&base, item_id);
        self.transport.get(&path, None).await
    }

    pub async fn create_tag(&self, label: &str) -> Result<Value> {
        let body = json!({"id": 0, "label": label});
        self.transport.post(self.layout.tag, Some(&body)).await
    }

    pub async fn edit_tag(&self, item_id: u64, label: &str) -> Result<Value> {
        let body = json!({"id": item_id, "label": label});
        let path = format!("{}/{}", self.layout.tag, item_id);
        self.transport.put(&path, Some(&body), None).await
    }

    pub async fn delete_tag(&self, item_id: u64) -> Result<Value> {
        let path = format!("{}/{}", self.layout.tag, item_id);
        self.transport.delete(&path, None).await
    }

    pub async fn get_exclusion(&self, item_id: Option<u64>) -> Result<Value> {
        let path = path_with_id(self.layout.exclusions, item_id);
        self.transport.get(&path, None).await
    }

    pub(crate) async fn create_exclusion(&self, body: &Value) -> Result<Value> {
        self.transport.post(self.layout.exclusions, Some(body)).await
    }

    pub async fn delete_exclusion(&self, item_id: u64) -> Result<Value> {
        let path = format!("{}/{}", self.layout.exclusions, item_id);
        self.transport.delete(&path, None).await
    }

    /// Strip characters that are not allowed in a directory name on this platform.
    pub fn to_path(&self, basename: &str) -> String {
        strip_chars(basename, INVALID_PATH_CHARS)
    }

    /// Full server path `<root folder>/<title>` for a new item.
    ///
    /// `root_folder_id` falls back to the client's default root folder. A
    /// resulting id of 0 picks the first folder reported by the server; any
    /// other id must match one of them.
    #[instrument(skip(self))]
    pub async fn build_item_path(&self, title: &str, root_folder_id: u32) -> Result<String> {
        let folders = self.get_root_folders().await?;
        let selected = if root_folder_id != 0 {
            root_folder_id
        } else {
            self.default_root_folder_id
        };

        let root = if selected == 0 {
            folders.first()
        } else {
            folders
                .iter()
                .find(|folder| folder_id(folder) == Some(u64::from(selected)))
        };

        let root_path = root
            .and_then(|folder| folder.get("path"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::client(format!("Invalid root folder Id: {}", selected)))?;

        let path = join_path(root_path, &self.to_path(title));
        info!("Using root folder {} for {}", root_path, title);
        debug!(path = %path, "Built item path");
        Ok(path)
    }
}

fn path_with_id(base: &str, id: Option<u64>) -> String {
    match id {
        Some(id) => format!("{}/{}", base, id),
        None => base.to_string(),
    }
}

fn delete_params(delete_files: bool, options: &Params) -> Params {
    let mut params = Params::new();
    params.insert("deleteFiles".to_string(), json!(delete_files));
    params.extend(options.iter().map(|(k, v)| (k.clone(), v.clone())));
    params
}

fn folder_id(folder: &Value) -> Option<u64> {
    folder.get("id").and_then(Value::as_u64)
}

fn into_list(value: Value, path: &str) -> Result<Vec<Value>> {
    match value {
        Value::Array(values) => Ok(values),
        Value::Null => Ok(Vec::new()),
        other => Err(Error::client(format!(
            "Expected a list from {}, got: {}",
            path, other
        ))),
    }
}

fn strip_chars(name: &str, invalid: &str) -> String {
    name.chars().filter(|c| !invalid.contains(*c)).collect()
}

/// Append a directory name to a server path, keeping the server's separator.
fn join_path(root: &str, name: &str) -> String {
    if root.ends_with('/') || root.ends_with('\\') {
        format!("{}{}", root, name)
    } else if root.contains('\\') && !root.contains('/') {
        format!("{}\\{}", root, name)
    } else {
        format!("{}/{}", root, name)
    }
}
