// portfolio-client/src/client.rs
use crate::config::Config;
use crate::like::{LikeState, LikeStatus};
use crate::models::{ActionResult, EditedComment, PostedComment, Replies, UnreadCount};
use crate::search::ProjectSearch;
use anyhow::{anyhow, bail, Result};
use portfolio_api::{
    ApiClient, FileUpload, NotificationKind, Notifier, ReqwestClient, ResponseBody, NO_BODY,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Banner copy for outcomes the site itself does not describe
pub mod messages {
    pub const LIKE_FAILED: &str = "An error occurred. Please try again.";
    pub const COMMENT_DELETED: &str = "Comment deleted.";
    pub const DELETE_FAILED: &str = "An error occurred while deleting the comment.";
    pub const COMMENT_UPDATED: &str = "Comment updated.";
    pub const UPDATE_FAILED: &str = "An error occurred while updating the comment.";
    pub const COMMENT_REPORTED: &str =
        "Comment reported. Our team will review this content.";
    pub const REPORT_FAILED: &str = "An error occurred while reporting the comment.";
    pub const COMMENT_POSTED: &str = "Comment posted.";
    pub const POST_FAILED: &str = "An error occurred while posting the comment.";
    pub const REPLIES_FAILED: &str = "Unable to load replies.";
    pub const NOTIFICATIONS_FAILED: &str = "Unable to load notifications.";
}

/// Form field the site reads comment images from
const IMAGE_FIELD: &str = "image";

/// Body field the site's AJAX views put their refusal text in
const ERROR_FIELD: &str = "error";

pub struct PortfolioClient {
    /// JSON API under the configured prefix
    api: ApiClient<ReqwestClient>,
    /// AJAX views mounted at the site root
    site: ApiClient<ReqwestClient>,
}

impl PortfolioClient {
    pub fn new(config: &Config, notifier: Arc<dyn Notifier>) -> Self {
        let cookies = config.cookies();
        let http = ReqwestClient::new().with_cookies(cookies.to_string());

        let api = ApiClient::from_cookies(http, &config.site.base_url, cookies)
            .with_prefix(&config.site.api_prefix)
            .with_notifier(notifier);
        let site = api.clone().with_prefix("").with_error_field(ERROR_FIELD);

        if api.csrf_token().is_none() {
            warn!("no csrftoken cookie in session; mutating requests will be rejected");
        }

        Self { api, site }
    }

    pub fn api(&self) -> &ApiClient<ReqwestClient> {
        &self.api
    }

    fn notify(&self, message: &str, kind: NotificationKind) {
        self.site.notifier().notify(message, kind);
    }

    /// Decode a successful body, raising the `failure` banner when it has an
    /// unexpected shape (e.g. the login page served to an expired session)
    fn decode<T: DeserializeOwned>(&self, body: ResponseBody, failure: &str) -> Result<T> {
        body.decode().map_err(|e| {
            warn!(error = %e, "unexpected response body");
            self.notify(failure, NotificationKind::Error);
            e.into()
        })
    }

    /// Fail with the site's own error text when it answers `success: false`
    fn check_action(&self, body: &ResponseBody, failure: &str) -> Result<ActionResult> {
        let result: ActionResult = self.decode(body.clone(), failure)?;
        if result.success {
            return Ok(result);
        }

        let message = result.error.as_deref().unwrap_or(failure);
        self.notify(message, NotificationKind::Error);
        match &result.errors {
            Some(errors) => bail!("{} ({})", message, errors),
            None => bail!("{}", message),
        }
    }

    pub async fn toggle_project_like(&self, project_id: u64) -> Result<LikeStatus> {
        debug!(project_id, "toggling project like");
        let body = self
            .site
            .post(&format!("/project/{}/like/", project_id), NO_BODY, &[])
            .await?;
        self.decode(body, messages::LIKE_FAILED)
    }

    /// Flip `state` right away, then confirm with the server.
    ///
    /// `state` is rolled back when the server refuses or the call fails, and
    /// takes the server's count when it succeeds.
    pub async fn toggle_comment_like(
        &self,
        comment_id: u64,
        state: &mut LikeState,
    ) -> Result<LikeStatus> {
        let previous = state.toggle();
        debug!(comment_id, liked = state.liked, "optimistic comment like");

        let outcome = match self
            .site
            .post(&format!("/comment/{}/like/", comment_id), NO_BODY, &[])
            .await
        {
            Ok(body) => self.decode::<LikeStatus>(body, messages::LIKE_FAILED),
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(status) if status.success => {
                state.reconcile(&status);
                Ok(status)
            }
            Ok(_) => {
                warn!(comment_id, "server refused like toggle, rolling back");
                state.rollback(previous);
                self.notify(messages::LIKE_FAILED, NotificationKind::Error);
                Err(anyhow!(messages::LIKE_FAILED))
            }
            Err(e) => {
                warn!(comment_id, error = %e, "like toggle failed, rolling back");
                state.rollback(previous);
                Err(e)
            }
        }
    }

    pub async fn delete_comment(&self, comment_id: u64) -> Result<ActionResult> {
        let body = self
            .site
            .post(&format!("/comment/{}/delete/", comment_id), NO_BODY, &[])
            .await?;
        let result = self.check_action(&body, messages::DELETE_FAILED)?;
        self.notify(
            result.message.as_deref().unwrap_or(messages::COMMENT_DELETED),
            NotificationKind::Success,
        );
        Ok(result)
    }

    pub async fn edit_comment(
        &self,
        comment_id: u64,
        text: &str,
        image: Option<FileUpload>,
    ) -> Result<EditedComment> {
        let body = self
            .site
            .upload_file(
                &format!("/comment/{}/edit/", comment_id),
                &[("text", text)],
                IMAGE_FIELD,
                image,
                &[],
            )
            .await?;
        let result = self.check_action(&body, messages::UPDATE_FAILED)?;
        let edited: EditedComment = self.decode(body, messages::UPDATE_FAILED)?;
        self.notify(
            result.message.as_deref().unwrap_or(messages::COMMENT_UPDATED),
            NotificationKind::Success,
        );
        Ok(edited)
    }

    pub async fn report_comment(&self, comment_id: u64) -> Result<ActionResult> {
        let body = self
            .site
            .post(&format!("/comment/{}/report/", comment_id), NO_BODY, &[])
            .await?;
        let result = self.check_action(&body, messages::REPORT_FAILED)?;
        self.notify(
            result.message.as_deref().unwrap_or(messages::COMMENT_REPORTED),
            NotificationKind::Success,
        );
        Ok(result)
    }

    pub async fn comment_replies(&self, comment_id: u64) -> Result<Replies> {
        let body = self
            .site
            .get(&format!("/comment/{}/replies/", comment_id), &[])
            .await?;
        self.check_action(&body, messages::REPLIES_FAILED)?;
        self.decode(body, messages::REPLIES_FAILED)
    }

    pub async fn add_comment(
        &self,
        project_id: u64,
        text: &str,
        image: Option<FileUpload>,
    ) -> Result<PostedComment> {
        self.post_comment(&format!("/projets/{}/comment/", project_id), text, image)
            .await
    }

    pub async fn add_reply(
        &self,
        comment_id: u64,
        text: &str,
        image: Option<FileUpload>,
    ) -> Result<PostedComment> {
        self.post_comment(&format!("/comment/{}/reply/", comment_id), text, image)
            .await
    }

    async fn post_comment(
        &self,
        endpoint: &str,
        text: &str,
        image: Option<FileUpload>,
    ) -> Result<PostedComment> {
        let body = self
            .site
            .upload_file(endpoint, &[("text", text)], IMAGE_FIELD, image, &[])
            .await?;
        self.check_action(&body, messages::POST_FAILED)?;
        let posted: PostedComment = self.decode(body, messages::POST_FAILED)?;
        self.notify(messages::COMMENT_POSTED, NotificationKind::Success);
        Ok(posted)
    }

    pub async fn unread_notification_count(&self) -> Result<u64> {
        let body = self.site.get("/unread-notifications/", &[]).await?;
        let count: UnreadCount = self.decode(body, messages::NOTIFICATIONS_FAILED)?;
        Ok(count.unread_count)
    }

    /// The site answers with a redirect to the notification's target page;
    /// only the status matters here
    pub async fn mark_notification_read(&self, notification_id: u64) -> Result<()> {
        self.site
            .post(
                &format!("/notification/mark-as-read/{}/", notification_id),
                NO_BODY,
                &[],
            )
            .await?;
        Ok(())
    }

    pub async fn mark_all_notifications_read(&self) -> Result<()> {
        self.site
            .post("/mark-all-notifications-as-read/", NO_BODY, &[])
            .await?;
        Ok(())
    }

    /// Rendered search results page
    pub async fn search_projects(&self, search: &ProjectSearch) -> Result<String> {
        let body = self
            .site
            .get(&format!("/search/?{}", search.query_string()), &[])
            .await?;
        Ok(body.into_text())
    }
}
