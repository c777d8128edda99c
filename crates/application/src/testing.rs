//! In-memory Server API for tests.
//!
//! [`InMemoryListsApi`] keeps record lists, items, subscriptions, the audit
//! log, databases and record histories in memory and applies the same rules
//! as the server for the operations the SDK uses. Failures can be injected
//! per endpoint and every call is counted.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use recordlists_domain::dto::{
    AuditLogItemDto, AuditLogSearchRequestDto, BooleanCriterionDto, CreateRecordListDto,
    CreateRecordListItemsInfoDto, CriterionDto, DatabasesInfoDto, DeleteRecordListItemsDto,
    ListItemDto, MiVersionDto, RecordHistoryDto, RecordListHeaderDto, RecordListHeadersInfoDto,
    RecordListItemsInfoDto, RecordListSearchCriterionDto, RecordListSearchRequestDto,
    RecordListSearchResultDto, RecordListSearchResultsInfoDto, RecordVersionDto, SearchInfoDto,
    SlimDatabaseDto, SlimRecordVersionDto, UpdateRecordListPropertiesDto, UserOrGroupDto,
};
use recordlists_domain::guid::normalize_guid;
use recordlists_domain::{AuditLogAction, BooleanOperator, UserRole};
use uuid::Uuid;

use crate::ports::{
    ListTransition, ListsApi, RecordVersionRequest, TransportError, TransportResult,
};

/// Server API endpoints, used to count calls and inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /swagger/v1/swagger.json`
    ApiDefinition,
    /// `GET schema/mi-version`
    MiVersion,
    /// `GET lists`
    GetAllLists,
    /// `GET lists/list/{id}`
    GetList,
    /// `POST lists`
    CreateList,
    /// `PATCH lists/list/{id}`
    UpdateList,
    /// `DELETE lists/list/{id}`
    DeleteList,
    /// `POST lists/list/{id}/{transition}`
    TransitionList,
    /// `GET lists/list/{id}/items`
    GetListItems,
    /// `POST lists/list/{id}/items/add`
    AddItems,
    /// `POST lists/list/{id}/items/remove`
    RemoveItems,
    /// `POST lists/list/{id}/permissions/subscribe`
    Subscribe,
    /// `POST lists/list/{id}/permissions/unsubscribe`
    Unsubscribe,
    /// `POST lists/search`
    RunSearch,
    /// `GET lists/search/results/{id}`
    SearchResults,
    /// `POST lists/audit/search`
    RunAuditSearch,
    /// `GET lists/audit/search/results/{id}`
    AuditSearchResults,
    /// `GET databases`
    Databases,
    /// `GET db/{key}/record-histories/{guid}`
    RecordHistory,
    /// `GET db/{key}/tables/{table}/record-histories/{guid}/record-versions/{guid}`
    RecordVersion,
}

#[derive(Debug, Clone)]
struct StoredList {
    header: RecordListHeaderDto,
    items: Vec<ListItemDto>,
    subscribers: HashSet<String>,
}

#[derive(Debug)]
struct State {
    current_user: UserOrGroupDto,
    lists: Vec<StoredList>,
    audit_log: Vec<AuditLogItemDto>,
    search_results: HashMap<String, RecordListSearchResultsInfoDto>,
    audit_results: HashMap<String, Vec<AuditLogItemDto>>,
    databases: Vec<SlimDatabaseDto>,
    records: HashMap<(String, String), Result<Vec<SlimRecordVersionDto>, u16>>,
    mi_version: String,
    api_definition: bool,
    failures: HashMap<Endpoint, TransportError>,
    calls: Vec<Endpoint>,
}

/// A Server API held in memory.
#[derive(Debug)]
pub struct InMemoryListsApi {
    state: Mutex<State>,
}

impl Default for InMemoryListsApi {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryListsApi {
    /// An empty server running a supported release, with no databases.
    #[must_use]
    pub fn new() -> Self {
        let user = Uuid::new_v4().to_string();
        Self {
            state: Mutex::new(State {
                current_user: UserOrGroupDto {
                    identifier: Some(user),
                    display_name: Some("DOMAIN\\mi_user".to_string()),
                    name: Some("DOMAIN\\mi_user".to_string()),
                },
                lists: Vec::new(),
                audit_log: Vec::new(),
                search_results: HashMap::new(),
                audit_results: HashMap::new(),
                databases: Vec::new(),
                records: HashMap::new(),
                mi_version: "25.2.820.0".to_string(),
                api_definition: true,
                failures: HashMap::new(),
                calls: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records a call to `endpoint`, failing it if a failure is injected.
    fn enter(&self, endpoint: Endpoint) -> TransportResult<MutexGuard<'_, State>> {
        let mut state = self.state();
        state.calls.push(endpoint);
        if let Some(error) = state.failures.get(&endpoint).cloned() {
            return Err(error);
        }
        Ok(state)
    }

    /// Registers a database.
    pub fn add_database(&self, guid: &str, key: &str) {
        self.state().databases.push(SlimDatabaseDto {
            guid: guid.to_string(),
            key: key.to_string(),
            name: Some(key.to_string()),
        });
    }

    /// Registers a record history and the versions the caller can see.
    pub fn add_record(
        &self,
        database_key: &str,
        record_history_guid: &str,
        versions: &[(&str, u32)],
    ) {
        let versions = versions
            .iter()
            .map(|(guid, version_number)| SlimRecordVersionDto {
                guid: (*guid).to_string(),
                version_number: *version_number,
            })
            .collect();
        self.state().records.insert(
            (database_key.to_string(), normalize_guid(record_history_guid)),
            Ok(versions),
        );
    }

    /// Makes every request for a record history answer with `status`.
    pub fn deny_record(&self, database_key: &str, record_history_guid: &str, status: u16) {
        self.state().records.insert(
            (database_key.to_string(), normalize_guid(record_history_guid)),
            Err(status),
        );
    }

    /// Sets the version the server reports.
    pub fn set_mi_version(&self, version: &str) {
        self.state().mi_version = version.to_string();
    }

    /// Makes the API definition request answer 404.
    pub fn remove_api_definition(&self) {
        self.state().api_definition = false;
    }

    /// Makes every call to `endpoint` fail with `error` until cleared.
    pub fn fail(&self, endpoint: Endpoint, error: TransportError) {
        self.state().failures.insert(endpoint, error);
    }

    /// Removes every injected failure.
    pub fn clear_failures(&self) {
        self.state().failures.clear();
    }

    /// Total number of calls received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state().calls.len()
    }

    /// Number of calls received by `endpoint`.
    #[must_use]
    pub fn calls_to(&self, endpoint: Endpoint) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|called| **called == endpoint)
            .count()
    }

    /// Forgets every recorded call.
    pub fn reset_calls(&self) {
        self.state().calls.clear();
    }

    /// Identifier of the user the server authenticates requests as.
    #[must_use]
    pub fn current_user_identifier(&self) -> String {
        self.state()
            .current_user
            .identifier
            .clone()
            .unwrap_or_default()
    }
}

impl State {
    fn find(&self, identifier: &str) -> TransportResult<usize> {
        self.lists
            .iter()
            .position(|list| list.header.identifier == identifier)
            .ok_or_else(|| {
                TransportError::status(404, format!("Record list '{identifier}' not found"))
            })
    }

    fn find_mut(&mut self, identifier: &str) -> TransportResult<&mut StoredList> {
        let index = self.find(identifier)?;
        Ok(&mut self.lists[index])
    }

    fn log(&mut self, list_identifier: &str, action: AuditLogAction) {
        // Newest first, like the server.
        self.audit_log.insert(
            0,
            AuditLogItemDto {
                list_identifier: list_identifier.to_string(),
                initiating_user: self.current_user.clone(),
                action,
                timestamp: Utc::now(),
            },
        );
    }

    fn touch(&self, header: &mut RecordListHeaderDto) {
        header.last_modified_timestamp = Some(Utc::now());
        header.last_modified_user = Some(self.current_user.clone());
    }

    fn insert_list(
        &mut self,
        header: RecordListHeaderDto,
        items: Vec<ListItemDto>,
    ) -> RecordListHeaderDto {
        self.lists.push(StoredList {
            header: header.clone(),
            items,
            subscribers: HashSet::new(),
        });
        header
    }

    fn new_header(&self, name: String) -> RecordListHeaderDto {
        RecordListHeaderDto {
            identifier: Uuid::new_v4().to_string(),
            name,
            description: None,
            notes: None,
            created_timestamp: Utc::now(),
            created_user: self.current_user.clone(),
            last_modified_timestamp: None,
            last_modified_user: None,
            published_timestamp: None,
            published_user: None,
            is_revision: false,
            published: false,
            awaiting_approval: false,
            internal_use: false,
            parent_record_list_identifier: None,
        }
    }

    fn editable(&mut self, identifier: &str) -> TransportResult<&mut StoredList> {
        let list = self.find_mut(identifier)?;
        if list.header.published {
            return Err(TransportError::status(
                400,
                "Published record lists cannot be modified",
            ));
        }
        Ok(list)
    }

    fn transition(
        &mut self,
        identifier: &str,
        transition: ListTransition,
    ) -> TransportResult<RecordListHeaderDto> {
        let index = self.find(identifier)?;
        let source = self.lists[index].clone();
        let user = self.current_user.clone();
        let now = Utc::now();

        match transition {
            ListTransition::Copy => {
                let mut header = self.new_header(format!("{} copy", source.header.name));
                header.description = source.header.description;
                header.notes = source.header.notes;
                let header = self.insert_list(header, source.items);
                self.log(&header.identifier, AuditLogAction::ListCopied);
                Ok(header)
            }
            ListTransition::Revise => {
                if !source.header.published {
                    return Err(conflict("Only published record lists can be revised"));
                }
                let mut header = self.new_header(source.header.name);
                header.description = source.header.description;
                header.notes = source.header.notes;
                header.is_revision = true;
                header.parent_record_list_identifier = Some(identifier.to_string());
                let header = self.insert_list(header, source.items);
                self.log(&header.identifier, AuditLogAction::ListRevised);
                Ok(header)
            }
            ListTransition::RequestApproval => {
                if source.header.awaiting_approval {
                    return Err(conflict("Record list is already awaiting approval"));
                }
                let action = if source.header.published {
                    AuditLogAction::ListSetToAwaitingApprovalForWithdrawal
                } else {
                    AuditLogAction::ListSetToAwaitingApprovalForPublishing
                };
                let list = &mut self.lists[index];
                list.header.awaiting_approval = true;
                let header = list.header.clone();
                self.log(identifier, action);
                Ok(header)
            }
            ListTransition::Publish => {
                if source.header.published || !source.header.awaiting_approval {
                    return Err(conflict(
                        "Record list must be awaiting approval and not published",
                    ));
                }
                let target = match &source.header.parent_record_list_identifier {
                    Some(parent) if source.header.is_revision => {
                        let parent_index = self.find(parent)?;
                        let parent = &mut self.lists[parent_index];
                        parent.header.name = source.header.name;
                        parent.header.description = source.header.description;
                        parent.header.notes = source.header.notes;
                        parent.items = source.items;
                        let parent_identifier = parent.header.identifier.clone();
                        self.lists.remove(index);
                        self.find(&parent_identifier)?
                    }
                    _ => index,
                };
                let list = &mut self.lists[target];
                list.header.published = true;
                list.header.awaiting_approval = false;
                list.header.published_timestamp = Some(now);
                list.header.published_user = Some(user);
                let header = list.header.clone();
                self.log(&header.identifier, AuditLogAction::ListPublished);
                Ok(header)
            }
            ListTransition::Withdraw => {
                if !source.header.published || !source.header.awaiting_approval {
                    return Err(conflict(
                        "Record list must be published and awaiting approval",
                    ));
                }
                let list = &mut self.lists[index];
                list.header.published = false;
                list.header.awaiting_approval = false;
                list.header.published_timestamp = Some(now);
                list.header.published_user = Some(user);
                list.subscribers.clear();
                let header = list.header.clone();
                self.log(identifier, AuditLogAction::ListUnpublished);
                Ok(header)
            }
            ListTransition::ResetAwaitingApproval => {
                if !source.header.awaiting_approval {
                    return Err(conflict("Record list is not awaiting approval"));
                }
                let list = &mut self.lists[index];
                list.header.awaiting_approval = false;
                let header = list.header.clone();
                self.log(identifier, AuditLogAction::ListApprovalRequestCancelled);
                Ok(header)
            }
        }
    }

    fn matches(&self, list: &StoredList, criterion: &CriterionDto) -> bool {
        match criterion {
            CriterionDto::Search(leaf) => self.matches_leaf(list, leaf),
            CriterionDto::Boolean(combinator) => self.matches_combinator(list, combinator),
        }
    }

    fn matches_combinator(&self, list: &StoredList, combinator: &BooleanCriterionDto) -> bool {
        [
            (BooleanOperator::MatchAll, &combinator.match_all),
            (BooleanOperator::MatchAny, &combinator.match_any),
            (BooleanOperator::MatchNone, &combinator.match_none),
        ]
        .into_iter()
        .filter_map(|(operator, children)| children.as_ref().map(|c| (operator, c)))
        .all(|(operator, children)| {
            operator.evaluate(children.iter().map(|child| self.matches(list, child)))
        })
    }

    fn matches_leaf(&self, list: &StoredList, leaf: &RecordListSearchCriterionDto) -> bool {
        let header = &list.header;
        let items = &list.items;

        let name_matches = leaf.name_contains.as_ref().is_none_or(|needle| {
            header.name.to_lowercase().contains(&needle.to_lowercase())
        });
        let flags_match = leaf.user_role.is_none_or(|role| self.has_role(list, role))
            && leaf.is_published.is_none_or(|value| header.published == value)
            && leaf.is_awaiting_approval.is_none_or(|value| header.awaiting_approval == value)
            && leaf.is_internal_use.is_none_or(|value| header.internal_use == value)
            && leaf.is_revision.is_none_or(|value| header.is_revision == value)
            && leaf
                .user_can_add_or_remove_items
                .is_none_or(|value| (self.is_owner(list) && !header.published) == value);
        let databases_match = leaf
            .contains_records_in_databases
            .as_ref()
            .is_none_or(|guids| any_item_in(items, guids, |item| Some(&item.database_guid)));
        let tables_match = leaf
            .contains_records_in_tables
            .as_ref()
            .is_none_or(|guids| any_item_in(items, guids, |item| item.table_guid.as_ref()));
        let schemas_match = leaf
            .contains_records_in_integration_schemas
            .as_ref()
            .is_none_or(Vec::is_empty);
        let records_match = leaf.contains_records.as_ref().is_none_or(|references| {
            references.iter().all(|reference| {
                items.iter().any(|item| {
                    normalize_guid(&item.database_guid) == reference.database_guid
                        && normalize_guid(&item.record_history_guid)
                            == reference.record_history_guid
                        && (reference.record_version.is_none()
                            || item.record_version == reference.record_version)
                })
            })
        });

        name_matches
            && flags_match
            && databases_match
            && tables_match
            && schemas_match
            && records_match
    }

    fn is_owner(&self, list: &StoredList) -> bool {
        list.header.created_user.identifier == self.current_user.identifier
    }

    fn is_subscriber(&self, list: &StoredList) -> bool {
        self.current_user
            .identifier
            .as_ref()
            .is_some_and(|user| list.subscribers.contains(user))
    }

    fn has_role(&self, list: &StoredList, role: UserRole) -> bool {
        match role {
            UserRole::Owner => self.is_owner(list),
            UserRole::Subscriber => self.is_subscriber(list),
            UserRole::None => !self.is_owner(list) && !self.is_subscriber(list),
            UserRole::Curator | UserRole::Administrator | UserRole::Publisher => false,
        }
    }
}

/// Whether any item has a GUID, chosen by `pick`, among `guids`.
fn any_item_in(
    items: &[ListItemDto],
    guids: &[String],
    pick: impl Fn(&ListItemDto) -> Option<&String>,
) -> bool {
    items
        .iter()
        .filter_map(pick)
        .any(|guid| guids.contains(&normalize_guid(guid)))
}

fn conflict(message: &str) -> TransportError {
    TransportError::status(400, message)
}

fn same_item(item: &ListItemDto, database_guid: &str, history: &str, version: Option<u32>) -> bool {
    normalize_guid(&item.database_guid) == normalize_guid(database_guid)
        && normalize_guid(&item.record_history_guid) == normalize_guid(history)
        && item.record_version == version
}

impl ListsApi for InMemoryListsApi {
    async fn get_api_definition(&self) -> TransportResult<()> {
        let state = self.enter(Endpoint::ApiDefinition)?;
        if state.api_definition {
            Ok(())
        } else {
            Err(TransportError::status(404, "Not Found"))
        }
    }

    async fn get_mi_version(&self) -> TransportResult<MiVersionDto> {
        let state = self.enter(Endpoint::MiVersion)?;
        Ok(MiVersionDto {
            version: state.mi_version.clone(),
            major_minor_version: None,
            binary_compatibility_version: None,
        })
    }

    async fn get_all_lists(&self) -> TransportResult<RecordListHeadersInfoDto> {
        let state = self.enter(Endpoint::GetAllLists)?;
        Ok(RecordListHeadersInfoDto {
            lists: state.lists.iter().map(|list| list.header.clone()).collect(),
        })
    }

    async fn get_list(&self, identifier: &str) -> TransportResult<RecordListHeaderDto> {
        let state = self.enter(Endpoint::GetList)?;
        let index = state.find(identifier)?;
        Ok(state.lists[index].header.clone())
    }

    async fn create_list(
        &self,
        body: &CreateRecordListDto,
    ) -> TransportResult<RecordListHeaderDto> {
        let mut state = self.enter(Endpoint::CreateList)?;
        let mut header = state.new_header(body.name.clone());
        header.description.clone_from(&body.description);
        header.notes.clone_from(&body.notes);
        let items = body
            .items
            .iter()
            .flat_map(|info| &info.items)
            .map(|item| ListItemDto {
                database_guid: item.database_guid.clone(),
                table_guid: Some(item.table_guid.clone()),
                record_history_guid: item.record_history_guid.clone(),
                record_version: item.record_version,
                record_guid: None,
            })
            .collect();
        let header = state.insert_list(header, items);
        state.log(&header.identifier, AuditLogAction::ListCreated);
        Ok(header)
    }

    async fn update_list(
        &self,
        identifier: &str,
        body: &UpdateRecordListPropertiesDto,
    ) -> TransportResult<RecordListHeaderDto> {
        let mut state = self.enter(Endpoint::UpdateList)?;
        let mut header = state.editable(identifier)?.header.clone();
        let mut actions = Vec::new();
        if let Some(name) = &body.name {
            header.name.clone_from(name);
            actions.push(AuditLogAction::ListNameChanged);
        }
        if let Some(description) = &body.description {
            header.description.clone_from(description);
            actions.push(AuditLogAction::ListDescriptionChanged);
        }
        if let Some(notes) = &body.notes {
            header.notes.clone_from(notes);
            actions.push(AuditLogAction::ListNotesChanged);
        }
        state.touch(&mut header);
        state.editable(identifier)?.header = header.clone();
        for action in actions {
            state.log(identifier, action);
        }
        Ok(header)
    }

    async fn delete_list(&self, identifier: &str) -> TransportResult<()> {
        let mut state = self.enter(Endpoint::DeleteList)?;
        let index = state.find(identifier)?;
        state.lists.remove(index);
        state.log(identifier, AuditLogAction::ListDeleted);
        Ok(())
    }

    async fn transition_list(
        &self,
        identifier: &str,
        transition: ListTransition,
    ) -> TransportResult<RecordListHeaderDto> {
        let mut state = self.enter(Endpoint::TransitionList)?;
        state.transition(identifier, transition)
    }

    async fn get_list_items(&self, identifier: &str) -> TransportResult<RecordListItemsInfoDto> {
        let state = self.enter(Endpoint::GetListItems)?;
        let index = state.find(identifier)?;
        Ok(RecordListItemsInfoDto {
            items: state.lists[index].items.clone(),
        })
    }

    async fn add_items(
        &self,
        identifier: &str,
        body: &CreateRecordListItemsInfoDto,
    ) -> TransportResult<RecordListItemsInfoDto> {
        let mut state = self.enter(Endpoint::AddItems)?;
        let list = state.editable(identifier)?;
        for item in &body.items {
            let present = list.items.iter().any(|existing| {
                same_item(
                    existing,
                    &item.database_guid,
                    &item.record_history_guid,
                    item.record_version,
                )
            });
            if !present {
                list.items.push(ListItemDto {
                    database_guid: item.database_guid.clone(),
                    table_guid: Some(item.table_guid.clone()),
                    record_history_guid: item.record_history_guid.clone(),
                    record_version: item.record_version,
                    record_guid: None,
                });
            }
        }
        let items = list.items.clone();
        for _ in &body.items {
            state.log(identifier, AuditLogAction::ItemAdded);
        }
        Ok(RecordListItemsInfoDto { items })
    }

    async fn remove_items(
        &self,
        identifier: &str,
        body: &DeleteRecordListItemsDto,
    ) -> TransportResult<RecordListItemsInfoDto> {
        let mut state = self.enter(Endpoint::RemoveItems)?;
        let list = state.editable(identifier)?;
        let before = list.items.len();
        list.items.retain(|existing| {
            !body.items.iter().any(|item| {
                same_item(
                    existing,
                    &item.database_guid,
                    &item.record_history_guid,
                    item.record_version,
                )
            })
        });
        let removed = before - list.items.len();
        let items = list.items.clone();
        for _ in 0..removed {
            state.log(identifier, AuditLogAction::ItemRemoved);
        }
        Ok(RecordListItemsInfoDto { items })
    }

    async fn subscribe(&self, identifier: &str) -> TransportResult<()> {
        let mut state = self.enter(Endpoint::Subscribe)?;
        let user = state.current_user.identifier.clone().unwrap_or_default();
        let list = state.find_mut(identifier)?;
        if !list.header.published {
            return Err(conflict("Only published record lists can be subscribed to"));
        }
        list.subscribers.insert(user);
        state.log(identifier, AuditLogAction::UserSubscribed);
        Ok(())
    }

    async fn unsubscribe(&self, identifier: &str) -> TransportResult<()> {
        let mut state = self.enter(Endpoint::Unsubscribe)?;
        let user = state.current_user.identifier.clone().unwrap_or_default();
        state.find_mut(identifier)?.subscribers.remove(&user);
        state.log(identifier, AuditLogAction::UserUnsubscribed);
        Ok(())
    }

    async fn run_search(
        &self,
        body: &RecordListSearchRequestDto,
    ) -> TransportResult<SearchInfoDto> {
        let mut state = self.enter(Endpoint::RunSearch)?;
        let include_items = body.response_options.include_record_list_items;
        let search_results = state
            .lists
            .iter()
            .filter(|list| state.matches(list, &body.search_criterion))
            .map(|list| RecordListSearchResultDto {
                header: list.header.clone(),
                items: if include_items {
                    list.items.clone()
                } else {
                    Vec::new()
                },
            })
            .collect();
        let identifier = Uuid::new_v4().to_string();
        state.search_results.insert(
            identifier.clone(),
            RecordListSearchResultsInfoDto { search_results },
        );
        Ok(SearchInfoDto {
            search_result_identifier: identifier,
        })
    }

    async fn get_search_results(
        &self,
        result_identifier: &str,
    ) -> TransportResult<RecordListSearchResultsInfoDto> {
        let state = self.enter(Endpoint::SearchResults)?;
        state
            .search_results
            .get(result_identifier)
            .cloned()
            .ok_or_else(|| TransportError::status(404, "Search results not found"))
    }

    async fn run_audit_search(
        &self,
        body: &AuditLogSearchRequestDto,
    ) -> TransportResult<SearchInfoDto> {
        let mut state = self.enter(Endpoint::RunAuditSearch)?;
        let matching = state.audit_log.iter().filter(|entry| {
            body.list_identifiers
                .as_ref()
                .is_none_or(|lists| lists.contains(&normalize_guid(&entry.list_identifier)))
                && body
                    .list_actions_to_include
                    .as_ref()
                    .is_none_or(|actions| actions.contains(&entry.action))
        });
        let page: Vec<_> = match body.paging_options {
            Some(paging) => matching
                .skip(paging.start_index as usize)
                .take(paging.page_size as usize)
                .cloned()
                .collect(),
            None => matching.cloned().collect(),
        };
        let identifier = Uuid::new_v4().to_string();
        state.audit_results.insert(identifier.clone(), page);
        Ok(SearchInfoDto {
            search_result_identifier: identifier,
        })
    }

    async fn get_audit_search_results(
        &self,
        result_identifier: &str,
    ) -> TransportResult<Vec<AuditLogItemDto>> {
        let state = self.enter(Endpoint::AuditSearchResults)?;
        state
            .audit_results
            .get(result_identifier)
            .cloned()
            .ok_or_else(|| TransportError::status(404, "Audit log search results not found"))
    }

    async fn get_databases(&self) -> TransportResult<DatabasesInfoDto> {
        let state = self.enter(Endpoint::Databases)?;
        Ok(DatabasesInfoDto {
            databases: state.databases.clone(),
        })
    }

    async fn get_record_history(
        &self,
        database_key: &str,
        record_history_guid: &str,
        _read_mode: bool,
    ) -> TransportResult<RecordHistoryDto> {
        let state = self.enter(Endpoint::RecordHistory)?;
        match state
            .records
            .get(&(database_key.to_string(), normalize_guid(record_history_guid)))
        {
            Some(Ok(versions)) => Ok(RecordHistoryDto {
                guid: Some(record_history_guid.to_string()),
                record_versions: versions.clone(),
            }),
            Some(Err(status)) => Err(TransportError::status(*status, "Record history unavailable")),
            None => Err(TransportError::status(404, "Record history not found")),
        }
    }

    async fn get_record_version(
        &self,
        request: RecordVersionRequest<'_>,
    ) -> TransportResult<RecordVersionDto> {
        let state = self.enter(Endpoint::RecordVersion)?;
        let key = (
            request.database_key.to_string(),
            normalize_guid(request.record_history_guid),
        );
        let version_guid = normalize_guid(request.record_version_guid);
        match state.records.get(&key) {
            Some(Ok(versions)) => versions
                .iter()
                .find(|version| normalize_guid(&version.guid) == version_guid)
                .map(|version| RecordVersionDto {
                    guid: version.guid.clone(),
                    version_number: Some(version.version_number),
                })
                .ok_or_else(|| TransportError::status(404, "Record version not found")),
            Some(Err(status)) => Err(TransportError::status(*status, "Record version unavailable")),
            None => Err(TransportError::status(404, "Record version not found")),
        }
    }
}
