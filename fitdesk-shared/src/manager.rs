//! The generic resource manager
//!
//! One [`ResourceState`] holds everything a resource page shows: the listed records, at most one
//! open form and at most one record in the detail view. [`ResourceManager`] drives the state
//! through the backend. The state lives in a [`StateCell`] so the browser can keep it in a
//! reactive signal, while tests keep it in a plain `RefCell`.

use std::cell::RefCell;

use tracing::{info, warn};

use crate::api::{ApiClient, ApiError, MutationReply, Transport};
use crate::form::{FormError, FormState};
use crate::payload::{build_payload, Payload};
use crate::record::ContentRecord;
use crate::schema::ResourceSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message for the user about the last operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}
impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A validated form, ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<F> {
    /// The record to update, `None` to create a new one
    pub id: Option<String>,
    pub payload: Payload<F>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<F> {
    pub schema: &'static ResourceSchema,
    /// Records in the order the server sent them
    pub items: Vec<ContentRecord>,
    pub form: Option<FormState<F>>,
    pub detail: Option<ContentRecord>,
    pub notice: Option<Notice>,
    /// A list request is in flight
    pub loading: bool,
    /// A mutation is in flight
    pub pending: bool,
}
impl<F> ResourceState<F> {
    pub fn new(schema: &'static ResourceSchema) -> Self {
        Self {
            schema,
            items: Vec::new(),
            form: None,
            detail: None,
            notice: None,
            loading: false,
            pending: false,
        }
    }

    /// Read only schemas never allow new records, singletons only while none exists
    pub fn can_create(&self) -> bool {
        !self.schema.read_only && (!self.schema.singleton || self.items.is_empty())
    }

    pub fn record(&self, id: &str) -> Option<&ContentRecord> {
        self.items.iter().find(|r| r.id == id)
    }

    /// Open an empty form. Returns false if no record may be created.
    pub fn open_new(&mut self) -> bool {
        if !self.can_create() {
            return false;
        }
        self.form = Some(FormState::blank(self.schema));
        self.detail = None;
        true
    }

    /// Open the form for an existing record, with media reset to unset
    pub fn select_for_edit(&mut self, id: &str) -> bool {
        if self.schema.read_only {
            return false;
        }
        let Some(form) = self.record(id).map(|r| FormState::from_record(self.schema, r)) else {
            return false;
        };
        self.form = Some(form);
        self.detail = None;
        true
    }

    pub fn show_details(&mut self, id: &str) -> bool {
        match self.record(id).cloned() {
            Some(record) => {
                self.detail = Some(record);
                true
            }
            None => false,
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn close_details(&mut self) {
        self.detail = None;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Replace the collection with a fresh listing
    pub fn apply_listed(&mut self, items: Vec<ContentRecord>) {
        self.loading = false;
        if let Some(open) = &self.detail {
            self.detail = items.iter().find(|r| r.id == open.id).cloned();
        }
        self.items = items;
    }

    /// The open form was stored by the backend
    pub fn apply_saved(&mut self, reply: &MutationReply) {
        self.pending = false;
        let updated = self.form.as_ref().is_some_and(FormState::is_edit);
        self.form = None;
        self.notice = Some(Notice::info(reply.message.clone().unwrap_or_else(|| {
            let verb = if updated { "updated" } else { "created" };
            format!("{} {verb} successfully.", capitalized(self.schema.singular))
        })));
    }

    /// Drop a deleted record without waiting for the next listing
    pub fn apply_deleted(&mut self, id: &str, reply: &MutationReply) {
        self.pending = false;
        self.items.retain(|r| r.id != id);
        if self.detail.as_ref().is_some_and(|r| r.id == id) {
            self.detail = None;
        }
        if self.form.as_ref().and_then(FormState::editing_id) == Some(id) {
            self.form = None;
        }
        self.notice = Some(Notice::info(reply.message.clone().unwrap_or_else(|| {
            format!("{} deleted successfully.", capitalized(self.schema.singular))
        })));
    }

    /// The write before went through, but the collection could not be refreshed afterwards
    ///
    /// The success notice stays, so nobody is led to send the same record twice.
    pub fn apply_stale(&mut self, error: &ApiError) {
        self.loading = false;
        let refresh = format!("The list could not be refreshed: {error}");
        self.notice = Some(match self.notice.take() {
            Some(notice) if notice.kind == NoticeKind::Info => {
                Notice::info(format!("{} {refresh}", notice.message))
            }
            _ => Notice::info(refresh),
        });
    }

    /// Surface `error`; the collection and any open form stay as they are
    pub fn apply_failure(&mut self, error: &ApiError) {
        self.loading = false;
        self.pending = false;
        self.notice = Some(Notice::error(error.to_string()));
    }

    /// Validate the open form and turn it into a request body
    pub fn prepare_submit(&mut self) -> Result<Submission<F>, FormError>
    where
        F: Clone,
    {
        let form = self.form.as_ref().ok_or(FormError::NotOpen)?;
        let payload = build_payload(self.schema, form)?;
        let id = form.editing_id().map(str::to_string);
        self.pending = true;
        Ok(Submission { id, payload })
    }
}

/// Where a [`ResourceState`] lives
pub trait StateCell<F> {
    /// Run `f` on the state. `None` means the state is gone, e.g. because its view was closed.
    fn with_state<R>(&self, f: impl FnOnce(&mut ResourceState<F>) -> R) -> Option<R>;
}
impl<F> StateCell<F> for RefCell<ResourceState<F>> {
    fn with_state<R>(&self, f: impl FnOnce(&mut ResourceState<F>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Asks the user before anything is destroyed
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}
impl<T: Fn(&str) -> bool> Confirm for T {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    /// The user did not confirm; nothing was sent
    Cancelled,
    Deleted(MutationReply),
}

/// Drives one [`ResourceState`] through the backend
#[derive(Debug, Clone, Copy)]
pub struct ResourceManager<C> {
    cell: C,
}
impl<C> ResourceManager<C> {
    pub fn new(cell: C) -> Self {
        Self { cell }
    }

    pub fn cell(&self) -> &C {
        &self.cell
    }

    fn schema<F>(&self) -> Result<&'static ResourceSchema, ApiError>
    where
        C: StateCell<F>,
    {
        self.cell
            .with_state(|s| s.schema)
            .ok_or(ApiError::Detached)
    }

    /// Replace the local collection with what the server has
    ///
    /// On failure the previous collection is kept and an error notice is shown.
    pub async fn list<T>(&self, api: &ApiClient<T>) -> Result<usize, ApiError>
    where
        T: Transport,
        C: StateCell<T::File>,
    {
        let (schema, result) = self.fetch(api).await?;
        if let Err(e) = &result {
            warn!(resource = schema.key, error = %e, "Could not list records.");
            self.cell.with_state(|s| s.apply_failure(e));
        }
        result
    }

    /// Refetch after a write that went through; a failure only amends the success notice
    async fn resync<T>(&self, api: &ApiClient<T>)
    where
        T: Transport,
        C: StateCell<T::File>,
    {
        if let Ok((schema, Err(e))) = self.fetch(api).await {
            warn!(resource = schema.key, error = %e, "Could not refresh records after a write.");
            self.cell.with_state(|s| s.apply_stale(&e));
        }
    }

    /// Fetch the collection and store it. Errors of the request itself are returned inside.
    async fn fetch<T>(
        &self,
        api: &ApiClient<T>,
    ) -> Result<(&'static ResourceSchema, Result<usize, ApiError>), ApiError>
    where
        T: Transport,
        C: StateCell<T::File>,
    {
        let schema = self
            .cell
            .with_state(|s| {
                s.loading = true;
                s.schema
            })
            .ok_or(ApiError::Detached)?;
        match api.fetch_collection(schema).await {
            Ok(items) => {
                let count = items.len();
                self.cell
                    .with_state(|s| s.apply_listed(items))
                    .ok_or(ApiError::Detached)?;
                Ok((schema, Ok(count)))
            }
            Err(e) => Ok((schema, Err(e))),
        }
    }

    /// Send the open form as a create or update, then refetch the collection
    pub async fn submit<T>(&self, api: &ApiClient<T>) -> Result<MutationReply, ApiError>
    where
        T: Transport,
        C: StateCell<T::File>,
    {
        let prepared = self
            .cell
            .with_state(|s| s.prepare_submit().map(|sub| (s.schema, sub)))
            .ok_or(ApiError::Detached)?;
        let (schema, submission) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => {
                let e = ApiError::from(e);
                self.cell.with_state(|s| s.apply_failure(&e));
                return Err(e);
            }
        };

        let result = match &submission.id {
            Some(id) => api.update(schema, id, submission.payload).await,
            None => api.create(schema, submission.payload).await,
        };
        match result {
            Ok(reply) => {
                info!(resource = schema.key, id = ?submission.id, "Saved record.");
                self.cell
                    .with_state(|s| s.apply_saved(&reply))
                    .ok_or(ApiError::Detached)?;
                self.resync(api).await;
                Ok(reply)
            }
            Err(e) => {
                warn!(resource = schema.key, error = %e, "Could not save record.");
                self.cell.with_state(|s| s.apply_failure(&e));
                Err(e)
            }
        }
    }

    /// Delete the record `id` after the user confirmed it
    pub async fn delete<T>(
        &self,
        api: &ApiClient<T>,
        id: &str,
        confirm: &impl Confirm,
    ) -> Result<Deletion, ApiError>
    where
        T: Transport,
        C: StateCell<T::File>,
    {
        let schema = self.schema::<T::File>()?;
        if schema.read_only {
            warn!(resource = schema.key, "Refusing to delete from a read only resource.");
            return Ok(Deletion::Cancelled);
        }
        let question = format!("Are you sure you want to delete this {}?", schema.singular);
        if !confirm.confirm(&question) {
            return Ok(Deletion::Cancelled);
        }

        self.cell.with_state(|s| s.pending = true);
        match api.delete(schema, id).await {
            Ok(reply) => {
                info!(resource = schema.key, id, "Deleted record.");
                self.cell
                    .with_state(|s| s.apply_deleted(id, &reply))
                    .ok_or(ApiError::Detached)?;
                self.resync(api).await;
                Ok(Deletion::Deleted(reply))
            }
            Err(e) => {
                warn!(resource = schema.key, error = %e, "Could not delete record.");
                self.cell.with_state(|s| s.apply_failure(&e));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use serde_json::json;

    use super::*;
    use crate::mock::{MockTransport, Upload};
    use crate::api::{Method, RequestBody};
    use crate::resources::{ABOUT, PRICING, PROGRAMS, USERS};
    use crate::session::{MemoryStore, SessionContext, ADMIN_ROLE, ROLE_KEY, TOKEN_KEY};

    type State = ResourceState<Upload>;

    fn client(mock: &MockTransport) -> ApiClient<&MockTransport> {
        let session = SessionContext::load(MemoryStore::with_entries([
            (TOKEN_KEY, "t"),
            (ROLE_KEY, ADMIN_ROLE),
        ]));
        ApiClient::new(mock, "/api", session)
    }

    fn pricing_record(id: &str, duration: &str) -> serde_json::Value {
        json!({ "_id": id, "duration": duration, "price": 49, "features": ["Sauna"], "isPopular": false })
    }

    fn listed(schema: &'static ResourceSchema, records: Vec<serde_json::Value>) -> State {
        let mut state = State::new(schema);
        state.apply_listed(
            records
                .into_iter()
                .map(|r| ContentRecord::from_value(r).unwrap())
                .collect(),
        );
        state
    }

    /// A view that has already been closed
    struct Gone;
    impl StateCell<Upload> for Gone {
        fn with_state<R>(&self, _: impl FnOnce(&mut State) -> R) -> Option<R> {
            None
        }
    }

    /// A view that is closed while its first request is in flight
    struct ClosedAfterSend {
        state: RefCell<State>,
        calls: Cell<usize>,
    }
    impl ClosedAfterSend {
        fn new(state: State) -> Self {
            Self {
                state: RefCell::new(state),
                calls: Cell::new(0),
            }
        }
    }
    impl StateCell<Upload> for ClosedAfterSend {
        fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> Option<R> {
            let call = self.calls.get();
            self.calls.set(call + 1);
            (call == 0).then(|| f(&mut self.state.borrow_mut()))
        }
    }

    fn new_plan_form(state: &mut State) {
        assert!(state.open_new());
        let form = state.form.as_mut().unwrap();
        form.set_text("duration", "3 Months".into());
        form.set_text("price", "999".into());
        form.list_mut("features").unwrap().set(0, "Gym access".into());
    }

    #[tokio::test]
    async fn new_pricing_plan_is_posted_and_refetched() {
        let mock = MockTransport::new()
            .reply(200, json!({ "success": true }))
            .reply(
                200,
                json!({ "success": true, "pricings": [
                    pricing_record("p1", "1 Month"),
                    { "_id": "p2", "duration": "3 Months", "price": 999,
                      "features": ["Gym access", "Trainer"], "isPopular": true }
                ]}),
            );
        let api = client(&mock);
        let manager = ResourceManager::new(RefCell::new(listed(
            &PRICING,
            vec![pricing_record("p1", "1 Month")],
        )));

        manager.cell().with_state(|s| {
            assert!(s.open_new());
            let form = s.form.as_mut().unwrap();
            form.set_text("duration", "3 Months".into());
            form.set_text("price", "999".into());
            let features = form.list_mut("features").unwrap();
            features.set(0, "Gym access".into());
            features.push_empty();
            features.set(1, "Trainer".into());
            form.set_flag("isPopular", true);
        });

        manager.submit(&api).await.unwrap();

        let sent = mock.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].url, "/api/pricing");
        assert_eq!(
            sent[0].body,
            RequestBody::Json(json!({
                "duration": "3 Months",
                "price": 999,
                "features": ["Gym access", "Trainer"],
                "isPopular": true
            }))
        );
        assert_eq!(sent[1].method, Method::Get);

        let state = manager.cell().borrow();
        assert!(state.form.is_none());
        assert!(!state.pending);
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.record("p2").unwrap().text("duration").as_deref(), Some("3 Months"));
        assert_eq!(
            state.notice,
            Some(Notice::info("Pricing plan created successfully."))
        );
    }

    #[tokio::test]
    async fn edits_are_put_to_the_record() {
        let mock = MockTransport::new()
            .reply(200, json!({ "success": true, "message": "Program updated" }))
            .reply(200, json!({ "programs": [] }));
        let api = client(&mock);
        let manager = ResourceManager::new(RefCell::new(listed(
            &PROGRAMS,
            vec![json!({ "_id": "g1", "title": "Strength", "subtitle": "4 Week · 3x/week", "image": "/uploads/s.jpg" })],
        )));
        manager.cell().with_state(|s| {
            assert!(s.select_for_edit("g1"));
            s.form
                .as_mut()
                .unwrap()
                .set_files("image", vec![Upload("new.jpg")]);
        });
        let reply = manager.submit(&api).await.unwrap();
        assert_eq!(reply.message.as_deref(), Some("Program updated"));

        let sent = mock.sent();
        assert_eq!(sent[0].method, Method::Put);
        assert_eq!(sent[0].url, "/api/programs/g1");
        let RequestBody::Multipart(parts) = &sent[0].body else {
            panic!("programs are sent as multipart");
        };
        assert_eq!(parts.len(), 3);
        assert!(manager.cell().borrow().items.is_empty());
    }

    #[tokio::test]
    async fn delete_without_confirmation_changes_nothing() {
        let mock = MockTransport::new();
        let api = client(&mock);
        let before = listed(&PRICING, vec![pricing_record("p1", "1 Month")]);
        let manager = ResourceManager::new(RefCell::new(before.clone()));

        let asked = Cell::new(0);
        let decline = |question: &str| {
            assert_eq!(question, "Are you sure you want to delete this pricing plan?");
            asked.set(asked.get() + 1);
            false
        };
        let outcome = manager.delete(&api, "p1", &decline).await.unwrap();
        assert_eq!(outcome, Deletion::Cancelled);
        assert_eq!(asked.get(), 1);
        assert!(mock.sent().is_empty());
        assert_eq!(*manager.cell().borrow(), before);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_and_refetches() {
        let mock = MockTransport::new()
            .reply(200, json!({ "success": true }))
            .reply(200, json!({ "pricings": [pricing_record("p2", "6 Months")] }));
        let api = client(&mock);
        let manager = ResourceManager::new(RefCell::new(listed(
            &PRICING,
            vec![pricing_record("p1", "1 Month"), pricing_record("p2", "6 Months")],
        )));
        manager.cell().with_state(|s| s.show_details("p1"));

        let outcome = manager.delete(&api, "p1", &|_: &str| true).await.unwrap();
        assert!(matches!(outcome, Deletion::Deleted(_)));
        assert_eq!(mock.sent()[0].url, "/api/pricing/p1");
        let state = manager.cell().borrow();
        assert!(state.detail.is_none());
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, "p2");
    }

    #[tokio::test]
    async fn failures_keep_the_collection_and_show_the_server_message() {
        let mock = MockTransport::new()
            .reply(200, json!({ "success": false, "message": "Plan is in use" }))
            .reply(500, json!({ "message": "Database is down" }));
        let api = client(&mock);
        let before = listed(&PRICING, vec![pricing_record("p1", "1 Month")]);
        let manager = ResourceManager::new(RefCell::new(before.clone()));

        let err = manager.delete(&api, "p1", &|_: &str| true).await.unwrap_err();
        assert_eq!(err.to_string(), "Plan is in use");
        assert_eq!(manager.cell().borrow().items, before.items);
        assert_eq!(
            manager.cell().borrow().notice,
            Some(Notice::error("Plan is in use"))
        );

        assert!(manager.list(&api).await.is_err());
        let state = manager.cell().borrow();
        assert_eq!(state.items, before.items);
        assert!(!state.loading);
        assert_eq!(state.notice, Some(Notice::error("Database is down")));
    }

    #[tokio::test]
    async fn invalid_forms_are_not_sent() {
        let mock = MockTransport::new();
        let api = client(&mock);
        let manager = ResourceManager::new(RefCell::new(State::new(&PRICING)));
        assert_eq!(
            manager.submit(&api).await,
            Err(ApiError::Validation(FormError::NotOpen))
        );
        manager.cell().with_state(|s| s.open_new());
        assert_eq!(
            manager.submit(&api).await,
            Err(ApiError::Validation(FormError::Missing { label: "Duration" }))
        );
        assert!(mock.sent().is_empty());
        let state = manager.cell().borrow();
        assert!(state.form.is_some());
        assert_eq!(state.notice, Some(Notice::error("Duration is required")));
    }

    #[tokio::test]
    async fn closed_views_discard_responses() {
        let mock = MockTransport::new().reply(200, json!({ "pricings": [] }));
        let api = client(&mock);
        let manager = ResourceManager::new(Gone);
        assert_eq!(manager.list(&api).await, Err(ApiError::Detached));
        // nothing was even sent, the view was gone before the request
        assert!(mock.sent().is_empty());
    }

    #[tokio::test]
    async fn late_listing_is_dropped_once_the_view_closed() {
        let mock = MockTransport::new().reply(200, json!({ "pricings": [pricing_record("p1", "1 Month")] }));
        let api = client(&mock);
        let manager = ResourceManager::new(ClosedAfterSend::new(State::new(&PRICING)));
        assert_eq!(manager.list(&api).await, Err(ApiError::Detached));
        assert_eq!(mock.sent().len(), 1);
        assert!(manager.cell().state.borrow().items.is_empty());
    }

    #[tokio::test]
    async fn late_save_reply_is_dropped_once_the_view_closed() {
        let mock = MockTransport::new()
            .reply(200, json!({ "success": true }))
            .reply(200, json!({ "pricings": [] }));
        let api = client(&mock);
        let mut state = State::new(&PRICING);
        new_plan_form(&mut state);
        let manager = ResourceManager::new(ClosedAfterSend::new(state));

        assert_eq!(manager.submit(&api).await, Err(ApiError::Detached));
        // the create went out, but no refetch for a view that is gone
        let sent = mock.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Post);
    }

    #[tokio::test]
    async fn failed_refetch_keeps_the_success_notice() {
        let mock = MockTransport::new()
            .reply(200, json!({ "success": true }))
            .reply(500, json!({ "message": "Database is down" }));
        let api = client(&mock);
        let before = listed(&PRICING, vec![pricing_record("p1", "1 Month")]);
        let manager = ResourceManager::new(RefCell::new(before.clone()));
        manager.cell().with_state(new_plan_form);

        let reply = manager.submit(&api).await.unwrap();
        assert!(reply.success);

        let state = manager.cell().borrow();
        assert!(state.form.is_none());
        assert!(!state.loading);
        assert!(!state.pending);
        assert_eq!(state.items, before.items);
        assert_eq!(
            state.notice,
            Some(Notice::info(
                "Pricing plan created successfully. The list could not be refreshed: Database is down"
            ))
        );
    }

    #[tokio::test]
    async fn failed_refetch_after_delete_keeps_the_deletion() {
        let mock = MockTransport::new()
            .reply(200, json!({ "success": true }))
            .fail(crate::api::TransportError::Network("offline".into()));
        let api = client(&mock);
        let manager = ResourceManager::new(RefCell::new(listed(
            &PRICING,
            vec![pricing_record("p1", "1 Month"), pricing_record("p2", "6 Months")],
        )));

        let outcome = manager.delete(&api, "p1", &|_: &str| true).await.unwrap();
        assert!(matches!(outcome, Deletion::Deleted(_)));
        let state = manager.cell().borrow();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Info));
        assert!(state
            .notice
            .as_ref()
            .is_some_and(|n| n.message.starts_with("Pricing plan deleted successfully.")));
    }

    #[test]
    fn creation_rules() {
        let users = State::new(&USERS);
        assert!(!users.can_create());

        let mut about = State::new(&ABOUT);
        assert!(about.can_create());
        about.apply_listed(vec![ContentRecord::from_value(json!({ "_id": "a1" })).unwrap()]);
        assert!(!about.can_create());
        assert!(!about.open_new());
        assert!(about.select_for_edit("a1"));
        assert!(!about.select_for_edit("missing"));

        let mut users = listed(&USERS, vec![json!({ "_id": "u1", "fullName": "Ada" })]);
        assert!(!users.select_for_edit("u1"));
        assert!(users.show_details("u1"));
    }

    #[test]
    fn listing_refreshes_the_open_detail() {
        let mut state = listed(&PRICING, vec![pricing_record("p1", "1 Month")]);
        state.show_details("p1");
        state.apply_listed(vec![
            ContentRecord::from_value(pricing_record("p1", "2 Months")).unwrap()
        ]);
        assert_eq!(
            state.detail.as_ref().and_then(|r| r.text("duration")).as_deref(),
            Some("2 Months")
        );
        state.apply_listed(Vec::new());
        assert!(state.detail.is_none());
    }
}
