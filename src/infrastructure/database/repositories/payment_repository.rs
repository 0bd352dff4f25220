//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::db_err;
use crate::domain::payment::{
    CreatePaymentDto, Payment, PaymentFilter, PaymentRepository, PaymentStatus, UpdatePaymentDto,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::payment;
use crate::shared::PaginatedResult;

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: payment::Model) -> Payment {
    Payment {
        id: m.id,
        rental_id: m.rental_id,
        user_id: m.user_id,
        amount: m.amount,
        payment_method: m.payment_method,
        payment_date: m.payment_date,
        status: PaymentStatus::from_str(&m.status),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn create(&self, dto: CreatePaymentDto) -> DomainResult<Payment> {
        debug!("Creating payment for rental {}", dto.rental_id);
        let now = Utc::now();

        let model = payment::ActiveModel {
            rental_id: Set(dto.rental_id),
            user_id: Set(dto.user_id),
            amount: Set(dto.amount),
            payment_method: Set(dto.payment_method),
            payment_date: Set(dto.payment_date),
            status: Set(dto.status.as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_rental(&self, rental_id: i32) -> DomainResult<Vec<Payment>> {
        let models = payment::Entity::find()
            .filter(payment::Column::RentalId.eq(rental_id))
            .order_by_asc(payment::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn list(&self, filter: PaymentFilter) -> DomainResult<PaginatedResult<Payment>> {
        let page = filter.page;
        let mut query = payment::Entity::find();

        if let Some(rental_id) = filter.rental_id {
            query = query.filter(payment::Column::RentalId.eq(rental_id));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(payment::Column::UserId.eq(user_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(payment::Column::Status.eq(status.as_str()));
        }

        let query = query.order_by_desc(payment::Column::Id);
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(model_to_domain).collect(),
            total,
            page.page,
            page.limit,
        ))
    }

    async fn update(&self, id: i32, dto: UpdatePaymentDto) -> DomainResult<Option<Payment>> {
        debug!("Updating payment: {}", id);

        let Some(existing) = payment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: payment::ActiveModel = existing.into();
        if let Some(rental_id) = dto.rental_id {
            active.rental_id = Set(rental_id);
        }
        if let Some(user_id) = dto.user_id {
            active.user_id = Set(user_id);
        }
        if let Some(amount) = dto.amount {
            active.amount = Set(amount);
        }
        if let Some(method) = dto.payment_method {
            active.payment_method = Set(method);
        }
        if let Some(date) = dto.payment_date {
            active.payment_date = Set(date);
        }
        if let Some(status) = dto.status {
            active.status = Set(status.as_str().to_string());
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = payment::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
