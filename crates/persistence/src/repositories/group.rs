//! Group membership engine.
//!
//! Every mutating operation runs inside a single transaction and locks the
//! group row first, so concurrent operations on the same group serialize.
//! Any error before commit rolls the transaction back; callers never observe
//! partial state and may safely retry a failed operation.
//!
//! Authorization and validation rejections are reported as `Ok(false)` (or
//! `Ok(None)` for the detail query) with zero side effects; storage failures
//! surface as [`EngineError`] after rollback.

use domain::models::group::{CreateGroupRequest, CreatedGroup, GroupDetail, Membership};
use domain::models::{ChatListEntry, ChatRecord, GroupSystemEvent};
use domain::EngineError;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{
    ChatListEntryEntity, ChatRecordEntity, GroupEntity, GroupEventKindDb, GroupStatusDb,
    GroupSystemEventEntity, MemberWithProfileEntity, MembershipEntity, MessageKindDb,
};
use crate::metrics::QueryTimer;

/// Repository for group lifecycle and roster operations.
#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Creates a new GroupRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Fetch the full detail of a group as seen by one of its members.
    ///
    /// Returns `None` when the group does not exist, is dismissed, or the
    /// caller holds no active membership. Absence of access is "no data",
    /// not a fault. Read-only; no side effects.
    pub async fn get_group_detail(
        &self,
        user_id: Uuid,
        group_id: Uuid,
    ) -> Result<Option<GroupDetail>, EngineError> {
        let timer = QueryTimer::new("get_group_detail");

        let group = sqlx::query_as::<_, GroupEntity>(
            r#"
            SELECT id, owner_id, name, avatar, profile, people_num, status, created_at
            FROM groups
            WHERE id = $1 AND status = 'active'
            "#,
        )
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(group) = group else {
            timer.record();
            return Ok(None);
        };

        let is_member = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM group_members
                WHERE group_id = $1 AND user_id = $2 AND status = 'active'
            )
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        if !is_member {
            timer.record();
            return Ok(None);
        }

        let owner_name = sqlx::query_scalar::<_, String>(
            r#"
            SELECT nickname FROM users WHERE id = $1
            "#,
        )
        .bind(group.owner_id)
        .fetch_one(&self.pool)
        .await?;

        let members = sqlx::query_as::<_, MemberWithProfileEntity>(
            r#"
            SELECT
                gm.user_id, gm.is_owner, gm.visit_card,
                u.nickname, u.avatar, u.mobile, u.gender
            FROM group_members gm
            JOIN users u ON u.id = gm.user_id
            WHERE gm.group_id = $1 AND gm.status = 'active'
            ORDER BY gm.created_at ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        let not_disturb = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT not_disturb FROM chat_list_entries
            WHERE user_id = $1 AND group_id = $2
            "#,
        )
        .bind(user_id)
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await?;

        timer.record();
        Ok(Some(GroupDetail {
            group_id: group.id,
            owner_id: group.owner_id,
            owner_name,
            name: group.name,
            profile: group.profile,
            avatar: group.avatar,
            people_num: group.people_num,
            not_disturb: not_disturb.unwrap_or(false),
            created_at: group.created_at,
            members: members.into_iter().map(Into::into).collect(),
        }))
    }

    /// Create a group with the creator as sole owner.
    ///
    /// The creator is always a participant, even when absent from the
    /// request's invitee list. In one transaction this inserts the group row,
    /// one active membership and one visible chat-list entry per participant,
    /// and a notification record listing all participants. There is no
    /// idempotency key: two identical calls create two distinct groups.
    pub async fn create_group(
        &self,
        creator: Uuid,
        request: &CreateGroupRequest,
    ) -> Result<CreatedGroup, EngineError> {
        let timer = QueryTimer::new("create_group");
        let participants = request.participants(creator);

        let mut tx = self.pool.begin().await?;

        let group = sqlx::query_as::<_, GroupEntity>(
            r#"
            INSERT INTO groups (owner_id, name, avatar, profile, people_num)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, name, avatar, profile, people_num, status, created_at
            "#,
        )
        .bind(creator)
        .bind(&request.name)
        .bind(&request.avatar)
        .bind(&request.profile)
        .bind(participants.len() as i32)
        .fetch_one(&mut *tx)
        .await?;

        // The creator's row alone carries the owner flag.
        sqlx::query(
            r#"
            INSERT INTO group_members (group_id, user_id, is_owner)
            SELECT $1, participant, participant = $2
            FROM UNNEST($3::uuid[]) AS participant
            "#,
        )
        .bind(group.id)
        .bind(creator)
        .bind(&participants)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO chat_list_entries (user_id, group_id)
            SELECT participant, $1
            FROM UNNEST($2::uuid[]) AS participant
            "#,
        )
        .bind(group.id)
        .bind(&participants)
        .execute(&mut *tx)
        .await?;

        emit_system_event(
            &mut tx,
            group.id,
            GroupEventKindDb::Invited,
            creator,
            &participants,
        )
        .await?;

        tx.commit().await?;
        timer.record();

        tracing::debug!(group_id = %group.id, members = participants.len(), "group created");
        Ok(CreatedGroup {
            group: group.into(),
            member_ids: participants,
        })
    }

    /// Invite users into an existing group.
    ///
    /// Rejects with `Ok(false)` when the invitee list is empty, the group is
    /// missing or dismissed, or the inviter holds no active membership.
    /// Each invitee's membership and chat-list entry are reconciled
    /// independently: missing rows are inserted, soft-removed rows are
    /// reactivated, already-active rows are left untouched so the
    /// do-not-disturb preference survives a re-invite.
    ///
    /// `people_num` is incremented by the invitee count rather than
    /// recounted; callers must not re-invite currently-active members.
    pub async fn invite_members(
        &self,
        inviter: Uuid,
        group_id: Uuid,
        invitee_ids: &[Uuid],
    ) -> Result<bool, EngineError> {
        if invitee_ids.is_empty() {
            return Ok(false);
        }

        let timer = QueryTimer::new("invite_members");
        let mut tx = self.pool.begin().await?;

        let Some(group) = lock_group(&mut tx, group_id).await? else {
            timer.record();
            return Ok(false);
        };
        if group.status != GroupStatusDb::Active {
            timer.record();
            return Ok(false);
        }

        // The inviter needs an active membership row; a missing or
        // soft-removed row is rejected outright.
        let inviter_is_member = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM group_members
                WHERE group_id = $1 AND user_id = $2 AND status = 'active'
            )
            "#,
        )
        .bind(group_id)
        .bind(inviter)
        .fetch_one(&mut *tx)
        .await?;

        if !inviter_is_member {
            timer.record();
            return Ok(false);
        }

        sqlx::query(
            r#"
            UPDATE group_members
            SET status = 'active', updated_at = NOW()
            WHERE group_id = $1 AND user_id = ANY($2) AND status = 'inactive'
            "#,
        )
        .bind(group_id)
        .bind(invitee_ids)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO group_members (group_id, user_id)
            SELECT $1, invitee
            FROM UNNEST($2::uuid[]) AS invitee
            WHERE NOT EXISTS (
                SELECT 1 FROM group_members
                WHERE group_id = $1 AND user_id = invitee
            )
            "#,
        )
        .bind(group_id)
        .bind(invitee_ids)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE chat_list_entries
            SET visibility = 'visible', updated_at = NOW()
            WHERE group_id = $1 AND user_id = ANY($2) AND visibility = 'hidden'
            "#,
        )
        .bind(group_id)
        .bind(invitee_ids)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO chat_list_entries (user_id, group_id)
            SELECT invitee, $1
            FROM UNNEST($2::uuid[]) AS invitee
            WHERE NOT EXISTS (
                SELECT 1 FROM chat_list_entries
                WHERE group_id = $1 AND user_id = invitee
            )
            "#,
        )
        .bind(group_id)
        .bind(invitee_ids)
        .execute(&mut *tx)
        .await?;

        emit_system_event(
            &mut tx,
            group_id,
            GroupEventKindDb::Invited,
            inviter,
            invitee_ids,
        )
        .await?;

        sqlx::query(
            r#"
            UPDATE groups SET people_num = people_num + $2 WHERE id = $1
            "#,
        )
        .bind(group_id)
        .bind(invitee_ids.len() as i32)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();

        tracing::debug!(%group_id, invited = invitee_ids.len(), "members invited");
        Ok(true)
    }

    /// Remove a member from a group on behalf of its owner.
    ///
    /// Authorization is checked against the group row's recorded owner, not
    /// the membership flag. The owner's own row cannot be removed this way.
    /// Returns `Ok(false)` with zero side effects when the actor is not the
    /// owner, the group is not active, or the target holds no active
    /// non-owner membership.
    pub async fn remove_member(
        &self,
        group_id: Uuid,
        acting_owner: Uuid,
        target_member: Uuid,
    ) -> Result<bool, EngineError> {
        let timer = QueryTimer::new("remove_member");
        let mut tx = self.pool.begin().await?;

        let Some(group) = lock_group(&mut tx, group_id).await? else {
            timer.record();
            return Ok(false);
        };
        if group.status != GroupStatusDb::Active || group.owner_id != acting_owner {
            timer.record();
            return Ok(false);
        }

        let updated = sqlx::query(
            r#"
            UPDATE group_members
            SET status = 'inactive', updated_at = NOW()
            WHERE group_id = $1 AND user_id = $2 AND is_owner = FALSE AND status = 'active'
            "#,
        )
        .bind(group_id)
        .bind(target_member)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            timer.record();
            return Ok(false);
        }

        emit_system_event(
            &mut tx,
            group_id,
            GroupEventKindDb::Removed,
            acting_owner,
            &[target_member],
        )
        .await?;

        refresh_people_num(&mut tx, group_id).await?;

        tx.commit().await?;
        timer.record();

        tracing::debug!(%group_id, member = %target_member, "member removed");
        Ok(true)
    }

    /// Dissolve a group.
    ///
    /// Requires an active group and an owner-flagged active membership for
    /// the actor. Sets the group dismissed and every membership inactive.
    /// Chat-list entries are deliberately left untouched so members keep
    /// access to history; once dismissed, the group accepts no further
    /// membership operations.
    ///
    /// Dismissal emits no notification record, unlike the other mutating
    /// operations. That asymmetry is inherited behavior, kept as-is.
    pub async fn dismiss_group(
        &self,
        group_id: Uuid,
        acting_user: Uuid,
    ) -> Result<bool, EngineError> {
        let timer = QueryTimer::new("dismiss_group");
        let mut tx = self.pool.begin().await?;

        let Some(group) = lock_group(&mut tx, group_id).await? else {
            timer.record();
            return Ok(false);
        };
        if group.status != GroupStatusDb::Active {
            timer.record();
            return Ok(false);
        }

        let is_owner = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM group_members
                WHERE group_id = $1 AND user_id = $2 AND is_owner AND status = 'active'
            )
            "#,
        )
        .bind(group_id)
        .bind(acting_user)
        .fetch_one(&mut *tx)
        .await?;

        if !is_owner {
            timer.record();
            return Ok(false);
        }

        sqlx::query(
            r#"
            UPDATE groups SET status = 'dismissed' WHERE id = $1
            "#,
        )
        .bind(group_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE group_members
            SET status = 'inactive', updated_at = NOW()
            WHERE group_id = $1
            "#,
        )
        .bind(group_id)
        .execute(&mut *tx)
        .await?;

        refresh_people_num(&mut tx, group_id).await?;

        tx.commit().await?;
        timer.record();

        tracing::debug!(%group_id, "group dismissed");
        Ok(true)
    }

    /// Leave a group voluntarily.
    ///
    /// The effect is conditional on the precondition rather than gated by
    /// it: when the user holds an active non-owner membership it is set
    /// inactive, the chat-list entry hidden, a notification emitted and
    /// `people_num` recounted. When no such membership exists the operation
    /// commits as a no-op and still reports success.
    pub async fn quit_group(&self, user_id: Uuid, group_id: Uuid) -> Result<bool, EngineError> {
        let timer = QueryTimer::new("quit_group");
        let mut tx = self.pool.begin().await?;

        // Lock the group row (when it exists) so the recount below
        // serializes with concurrent invites on the same group.
        let _ = lock_group(&mut tx, group_id).await?;

        let updated = sqlx::query(
            r#"
            UPDATE group_members
            SET status = 'inactive', updated_at = NOW()
            WHERE group_id = $1 AND user_id = $2 AND is_owner = FALSE AND status = 'active'
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.commit().await?;
            timer.record();
            return Ok(true);
        }

        sqlx::query(
            r#"
            UPDATE chat_list_entries
            SET visibility = 'hidden', updated_at = NOW()
            WHERE user_id = $1 AND group_id = $2
            "#,
        )
        .bind(user_id)
        .bind(group_id)
        .execute(&mut *tx)
        .await?;

        emit_system_event(
            &mut tx,
            group_id,
            GroupEventKindDb::Quit,
            user_id,
            &[user_id],
        )
        .await?;

        refresh_people_num(&mut tx, group_id).await?;

        tx.commit().await?;
        timer.record();

        tracing::debug!(%group_id, user = %user_id, "member quit");
        Ok(true)
    }

    /// Get a user's membership row in a group, regardless of status.
    pub async fn get_membership(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Membership>, EngineError> {
        let timer = QueryTimer::new("get_membership");
        let result = sqlx::query_as::<_, MembershipEntity>(
            r#"
            SELECT id, group_id, user_id, is_owner, status, visit_card, created_at, updated_at
            FROM group_members
            WHERE group_id = $1 AND user_id = $2
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result.map(Into::into))
    }

    /// Get a user's chat-list entry for a group, regardless of visibility.
    pub async fn get_chat_entry(
        &self,
        user_id: Uuid,
        group_id: Uuid,
    ) -> Result<Option<ChatListEntry>, EngineError> {
        let timer = QueryTimer::new("get_chat_entry");
        let result = sqlx::query_as::<_, ChatListEntryEntity>(
            r#"
            SELECT id, user_id, group_id, visibility, not_disturb, created_at, updated_at
            FROM chat_list_entries
            WHERE user_id = $1 AND group_id = $2
            "#,
        )
        .bind(user_id)
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result.map(Into::into))
    }

    /// List a group's notification envelopes in emission order. Other parts
    /// of the system read these to fan notifications out to members.
    pub async fn list_chat_records(&self, group_id: Uuid) -> Result<Vec<ChatRecord>, EngineError> {
        let timer = QueryTimer::new("list_chat_records");
        let result = sqlx::query_as::<_, ChatRecordEntity>(
            r#"
            SELECT id, kind, group_id, created_at
            FROM chat_records
            WHERE group_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;
        timer.record();
        Ok(result.into_iter().map(Into::into).collect())
    }

    /// Get the system-event payload attached to a notification envelope.
    pub async fn find_system_event(
        &self,
        record_id: Uuid,
    ) -> Result<Option<GroupSystemEvent>, EngineError> {
        let timer = QueryTimer::new("find_system_event");
        let result = sqlx::query_as::<_, GroupSystemEventEntity>(
            r#"
            SELECT record_id, event, operated_by, affected_user_ids
            FROM group_system_events
            WHERE record_id = $1
            "#,
        )
        .bind(record_id)
        .fetch_optional(&self.pool)
        .await?;
        timer.record();
        Ok(result.map(Into::into))
    }
}

/// Lock the group row for the remainder of the transaction.
async fn lock_group(
    conn: &mut PgConnection,
    group_id: Uuid,
) -> Result<Option<GroupEntity>, sqlx::Error> {
    sqlx::query_as::<_, GroupEntity>(
        r#"
        SELECT id, owner_id, name, avatar, profile, people_num, status, created_at
        FROM groups
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(group_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Append an immutable notification record: one message envelope plus its
/// group-system-event payload.
async fn emit_system_event(
    conn: &mut PgConnection,
    group_id: Uuid,
    event: GroupEventKindDb,
    operated_by: Uuid,
    affected_user_ids: &[Uuid],
) -> Result<Uuid, sqlx::Error> {
    let record_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO chat_records (kind, group_id)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(MessageKindDb::GroupSystemEvent)
    .bind(group_id)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO group_system_events (record_id, event, operated_by, affected_user_ids)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(record_id)
    .bind(event)
    .bind(operated_by)
    .bind(affected_user_ids)
    .execute(&mut *conn)
    .await?;

    Ok(record_id)
}

/// Recompute the denormalized member count from the roster. The cache is
/// never trusted; this reads the transaction's own writes.
async fn refresh_people_num(conn: &mut PgConnection, group_id: Uuid) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        r#"
        UPDATE groups
        SET people_num = (
            SELECT COUNT(*)::int
            FROM group_members
            WHERE group_id = $1 AND status = 'active'
        )
        WHERE id = $1
        RETURNING people_num
        "#,
    )
    .bind(group_id)
    .fetch_one(&mut *conn)
    .await
}

#[cfg(test)]
mod tests {
    // GroupRepository behavior needs a database connection and is covered by
    // the integration tests in tests/group_engine_integration.rs.
}
