//! Recording fakes for the API, cloud provider, and prompter seams

use anyhow::Result;
use async_trait::async_trait;
use coreo_core::api::{
    CloudAccount, CloudAccountCreateRequest, GitKey, RoleCreationInfo, Team, Token,
};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::client::CoreoApi;
use crate::cloud::{CloudProvider, ProvisionedRole};
use crate::prompt::Prompter;

/// In-memory [`CoreoApi`] that records every call
#[derive(Default)]
pub struct FakeCoreoApi {
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<CloudAccountCreateRequest>>,
    create_error: Option<String>,
    fail_all: Option<String>,
    assigned_role_name: Option<String>,
}

impl FakeCoreoApi {
    /// Every call succeeds except cloud account creation
    pub fn failing_create(message: &str) -> Self {
        Self {
            create_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Every call fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            fail_all: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Role creation info names the role `name` instead of echoing the request
    pub fn assigning_role_name(mut self, name: &str) -> Self {
        self.assigned_role_name = Some(name.to_string());
        self
    }

    /// Calls made so far, as `method:arg,arg`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_requests(&self) -> Vec<CloudAccountCreateRequest> {
        self.created.lock().unwrap().clone()
    }

    pub fn role_info_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with("get_role_creation_info"))
            .count()
    }

    fn record(&self, method: &str, args: &[&str]) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", method, args.join(",")));

        match &self.fail_all {
            Some(message) => Err(anyhow::anyhow!(message.clone())),
            None => Ok(()),
        }
    }
}

fn account(id: &str, name: &str, team_id: &str) -> CloudAccount {
    CloudAccount {
        id: id.to_string(),
        name: name.to_string(),
        team_id: team_id.to_string(),
        tags: vec!["env:test".to_string()],
    }
}

#[async_trait]
impl CoreoApi for FakeCoreoApi {
    async fn list_cloud_accounts(&self, team_id: &str) -> Result<Vec<CloudAccount>> {
        self.record("list_cloud_accounts", &[team_id])?;
        Ok(vec![
            account("cloud-1", "production", team_id),
            account("cloud-2", "staging", team_id),
        ])
    }

    async fn get_cloud_account(&self, team_id: &str, cloud_id: &str) -> Result<CloudAccount> {
        self.record("get_cloud_account", &[team_id, cloud_id])?;
        Ok(account(cloud_id, "production", team_id))
    }

    async fn delete_cloud_account(&self, team_id: &str, cloud_id: &str) -> Result<()> {
        self.record("delete_cloud_account", &[team_id, cloud_id])
    }

    async fn get_role_creation_info(
        &self,
        team_id: &str,
        request: &CloudAccountCreateRequest,
    ) -> Result<RoleCreationInfo> {
        let role_name = request.role_name.clone().unwrap_or_default();
        self.record("get_role_creation_info", &[team_id, &role_name])?;
        Ok(RoleCreationInfo {
            role_name: self.assigned_role_name.clone().unwrap_or(role_name),
            aws_account: "123456789012".to_string(),
            external_id: "platform-ext".to_string(),
            policy: request.policy.clone(),
        })
    }

    async fn create_cloud_account(
        &self,
        team_id: &str,
        request: &CloudAccountCreateRequest,
    ) -> Result<CloudAccount> {
        self.record("create_cloud_account", &[team_id, &request.name])?;
        self.created.lock().unwrap().push(request.clone());

        if let Some(message) = &self.create_error {
            return Err(anyhow::anyhow!(message.clone()));
        }

        Ok(CloudAccount {
            id: "cloud-new".to_string(),
            name: request.name.clone(),
            team_id: team_id.to_string(),
            tags: request.tags.clone(),
        })
    }

    async fn get_team(&self, team_id: &str) -> Result<Team> {
        self.record("get_team", &[team_id])?;
        Ok(Team {
            id: team_id.to_string(),
            team_name: "Security".to_string(),
            team_description: "Security team".to_string(),
        })
    }

    async fn create_team(&self, name: &str, description: &str) -> Result<Team> {
        self.record("create_team", &[name, description])?;
        Ok(Team {
            id: "team-new".to_string(),
            team_name: name.to_string(),
            team_description: description.to_string(),
        })
    }

    async fn get_token(&self, token_id: &str) -> Result<Token> {
        self.record("get_token", &[token_id])?;
        Ok(Token {
            id: token_id.to_string(),
            name: "ci".to_string(),
            description: "CI pipeline".to_string(),
        })
    }

    async fn delete_token(&self, token_id: &str) -> Result<()> {
        self.record("delete_token", &[token_id])
    }

    async fn get_git_key(&self, team_id: &str, git_key_id: &str) -> Result<GitKey> {
        self.record("get_git_key", &[team_id, git_key_id])?;
        Ok(GitKey {
            id: git_key_id.to_string(),
            name: "deploy".to_string(),
            team_id: team_id.to_string(),
        })
    }

    async fn delete_git_key(&self, team_id: &str, git_key_id: &str) -> Result<()> {
        self.record("delete_git_key", &[team_id, git_key_id])
    }
}

/// [`CloudProvider`] with scripted outcomes
pub struct FakeCloud {
    role: Option<ProvisionedRole>,
    fail_delete: bool,
    visible: bool,
    created: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    existence_checks: Mutex<Vec<String>>,
}

impl FakeCloud {
    /// Role creation succeeds with the given ARN and external ID
    pub fn returning(role_arn: &str, external_id: &str) -> Self {
        Self {
            role: Some(ProvisionedRole {
                role_arn: role_arn.to_string(),
                external_id: external_id.to_string(),
            }),
            fail_delete: false,
            visible: true,
            created: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            existence_checks: Mutex::new(Vec::new()),
        }
    }

    /// Role creation fails
    pub fn failing_create() -> Self {
        Self {
            role: None,
            ..Self::returning("", "")
        }
    }

    pub fn with_failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn never_visible(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn created_roles(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    pub fn deleted_roles(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn existence_checks(&self) -> u32 {
        self.existence_checks.lock().unwrap().len() as u32
    }

    /// Role names passed to `role_exists`, in order
    pub fn checked_roles(&self) -> Vec<String> {
        self.existence_checks.lock().unwrap().clone()
    }
}

#[async_trait]
impl CloudProvider for FakeCloud {
    async fn create_role(&self, info: &RoleCreationInfo) -> Result<ProvisionedRole> {
        self.created.lock().unwrap().push(info.role_name.clone());
        self.role
            .clone()
            .ok_or_else(|| anyhow::anyhow!("create role failed"))
    }

    async fn delete_role(&self, role_name: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(role_name.to_string());
        if self.fail_delete {
            return Err(anyhow::anyhow!("delete role failed"));
        }
        Ok(())
    }

    async fn role_exists(&self, role_name: &str) -> Result<bool> {
        self.existence_checks
            .lock()
            .unwrap()
            .push(role_name.to_string());
        Ok(self.visible)
    }
}

/// [`Prompter`] replaying canned answers and recording the prompts shown
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            prompts: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, message: &str) -> Result<String> {
        self.prompts.push(message.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no answer scripted for: {}", message))
    }
}
