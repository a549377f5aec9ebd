use async_trait::async_trait;
use snapshooter_cloud::{
    Action, ActionStatus, CloudError, CloudProvider, CreateDroplet, CreatedDroplet, Droplet,
    PowerStatus, Progress, Result, Size, Snapshot,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// In-memory provider whose actions follow scripted status sequences
///
/// A script's first status is what the submit call returns; every later
/// status is handed out by one `get_action` call. Once a script runs out the
/// last status is repeated.
#[derive(Default)]
pub struct FakeProvider {
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    droplets: HashMap<String, Droplet>,
    snapshots: HashMap<String, Snapshot>,
    sizes: Vec<Size>,
    scripts: HashMap<String, Vec<ActionStatus>>,
    actions: HashMap<String, (String, ActionStatus, VecDeque<ActionStatus>)>,
    next_id: u64,
    destroy_fails: bool,
    calls: Vec<String>,
    created: Vec<CreateDroplet>,
}

#[allow(dead_code)]
impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_droplet(self, id: &str, name: &str, status: PowerStatus) -> Self {
        self.with_droplet_snapshots(id, name, status, &[])
    }

    pub fn with_droplet_snapshots(
        self,
        id: &str,
        name: &str,
        status: PowerStatus,
        snapshot_ids: &[&str],
    ) -> Self {
        self.state.lock().unwrap().droplets.insert(
            id.to_string(),
            Droplet {
                id: id.to_string(),
                name: name.to_string(),
                status,
                ip_address: Some("203.0.113.10".to_string()),
                snapshot_ids: snapshot_ids.iter().map(|s| s.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_snapshot(self, id: &str, name: &str, min_disk_size: u64) -> Self {
        self.state.lock().unwrap().snapshots.insert(
            id.to_string(),
            Snapshot {
                id: id.to_string(),
                name: name.to_string(),
                size_gigabytes: 2.5,
                min_disk_size,
                status: "available".to_string(),
                regions: vec!["fra1".to_string()],
            },
        );
        self
    }

    pub fn with_size(self, slug: &str, disk: u64, price_hourly: f64, regions: &[&str]) -> Self {
        self.state.lock().unwrap().sizes.push(Size {
            slug: slug.to_string(),
            disk,
            price_hourly,
            regions: regions.iter().map(|r| r.to_string()).collect(),
        });
        self
    }

    /// Script the statuses of the next action of `kind`
    pub fn with_script(self, kind: &str, statuses: &[ActionStatus]) -> Self {
        self.state
            .lock()
            .unwrap()
            .scripts
            .insert(kind.to_string(), statuses.to_vec());
        self
    }

    pub fn with_failing_destroy(self) -> Self {
        self.state.lock().unwrap().destroy_fails = true;
        self
    }

    /// Submit an action directly, as a provider call would
    pub fn submit(&self, kind: &str) -> Action {
        let mut state = self.state.lock().unwrap();
        let mut statuses: VecDeque<ActionStatus> = state
            .scripts
            .remove(kind)
            .unwrap_or_else(|| vec![ActionStatus::Completed])
            .into();
        let first = statuses.pop_front().unwrap_or(ActionStatus::Completed);

        state.next_id += 1;
        let id = state.next_id.to_string();
        state
            .actions
            .insert(id.clone(), (kind.to_string(), first, statuses));

        Action {
            id,
            status: first,
            kind: kind.to_string(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls whose name starts with `prefix`
    pub fn calls_to(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    pub fn created(&self) -> Vec<CreateDroplet> {
        self.state.lock().unwrap().created.clone()
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn droplet(&self, droplet_id: &str) -> Result<Droplet> {
        self.state
            .lock()
            .unwrap()
            .droplets
            .get(droplet_id)
            .cloned()
            .ok_or_else(|| CloudError::ResourceNotFound(format!("droplet {}", droplet_id)))
    }
}

#[async_trait]
impl CloudProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn list_droplets(&self) -> Result<Vec<Droplet>> {
        self.record("list_droplets".to_string());
        let mut droplets: Vec<Droplet> =
            self.state.lock().unwrap().droplets.values().cloned().collect();
        droplets.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(droplets)
    }

    async fn get_droplet(&self, droplet_id: &str) -> Result<Droplet> {
        self.record(format!("get_droplet:{}", droplet_id));
        self.droplet(droplet_id)
    }

    async fn get_snapshot(&self, snapshot_id: &str) -> Result<Snapshot> {
        self.record(format!("get_snapshot:{}", snapshot_id));
        self.state
            .lock()
            .unwrap()
            .snapshots
            .get(snapshot_id)
            .cloned()
            .ok_or_else(|| CloudError::ResourceNotFound(format!("image {}", snapshot_id)))
    }

    async fn list_sizes(&self) -> Result<Vec<Size>> {
        self.record("list_sizes".to_string());
        Ok(self.state.lock().unwrap().sizes.clone())
    }

    async fn get_action(&self, action_id: &str) -> Result<Action> {
        self.record(format!("get_action:{}", action_id));
        let mut state = self.state.lock().unwrap();
        let (kind, current, remaining) = state
            .actions
            .get_mut(action_id)
            .ok_or_else(|| CloudError::ResourceNotFound(format!("action {}", action_id)))?;

        if let Some(next) = remaining.pop_front() {
            *current = next;
        }

        Ok(Action {
            id: action_id.to_string(),
            status: *current,
            kind: kind.clone(),
        })
    }

    async fn shutdown(&self, droplet_id: &str) -> Result<Action> {
        self.record(format!("shutdown:{}", droplet_id));
        self.droplet(droplet_id)?;
        Ok(self.submit("shutdown"))
    }

    async fn power_on(&self, droplet_id: &str) -> Result<Action> {
        self.record(format!("power_on:{}", droplet_id));
        self.droplet(droplet_id)?;
        Ok(self.submit("power_on"))
    }

    async fn take_snapshot(&self, droplet_id: &str, name: &str) -> Result<Action> {
        self.record(format!("take_snapshot:{}:{}", droplet_id, name));
        self.droplet(droplet_id)?;
        Ok(self.submit("snapshot"))
    }

    async fn restore(&self, droplet_id: &str, snapshot_id: &str) -> Result<Action> {
        self.record(format!("restore:{}:{}", droplet_id, snapshot_id));
        self.droplet(droplet_id)?;
        Ok(self.submit("restore"))
    }

    async fn rebuild(&self, droplet_id: &str, image_id: &str) -> Result<Action> {
        self.record(format!("rebuild:{}:{}", droplet_id, image_id));
        self.droplet(droplet_id)?;
        Ok(self.submit("rebuild"))
    }

    async fn create_droplet(&self, request: &CreateDroplet) -> Result<CreatedDroplet> {
        self.record(format!("create_droplet:{}", request.name));
        let droplet = Droplet {
            id: format!("new-{}", request.name),
            name: request.name.clone(),
            status: PowerStatus::New,
            ip_address: None,
            snapshot_ids: Vec::new(),
        };
        {
            let mut state = self.state.lock().unwrap();
            state.created.push(request.clone());
            state.droplets.insert(droplet.id.clone(), droplet.clone());
        }

        // The create call itself reports the action; the first status is
        // observed by the caller's initial get_action.
        let action = self.submit("create");
        Ok(CreatedDroplet {
            droplet,
            action_id: action.id,
        })
    }

    async fn destroy(&self, droplet_id: &str) -> Result<()> {
        self.record(format!("destroy:{}", droplet_id));
        let mut state = self.state.lock().unwrap();
        if state.destroy_fails {
            return Err(CloudError::ApiError {
                status: 500,
                message: "Server Error".to_string(),
            });
        }
        state.droplets.remove(droplet_id);
        Ok(())
    }
}

/// Progress sink that records every event
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn contains(&self, event: &str) -> bool {
        self.events().iter().any(|e| e == event)
    }
}

impl Progress for RecordingProgress {
    fn start(&self, message: &str) {
        self.events.lock().unwrap().push(format!("start: {}", message));
    }

    fn succeed(&self) {
        self.events.lock().unwrap().push("ok".to_string());
    }

    fn fail(&self) {
        self.events.lock().unwrap().push("fail".to_string());
    }

    fn println(&self, line: &str) {
        self.events.lock().unwrap().push(format!("line: {}", line));
    }
}
