use sea_orm::Set;

use crate::domain::model::{NewVisit, Restaurant, User};
use crate::infra::storage::entity::{restaurant, user, visit};

/// Convert a database entity to a domain model
pub fn restaurant_from_entity(m: restaurant::Model) -> Restaurant {
    Restaurant {
        id: m.id,
        name: m.name,
        address: m.address,
        phone: m.phone,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub fn user_from_entity(m: user::Model) -> User {
    User {
        id: m.id,
        name: m.name,
        email: m.email,
        provider: m.provider,
        provider_id: m.provider_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub fn restaurant_to_active(r: Restaurant) -> restaurant::ActiveModel {
    restaurant::ActiveModel {
        id: Set(r.id),
        name: Set(r.name),
        address: Set(r.address),
        phone: Set(r.phone),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

pub fn user_to_active(u: User) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(u.id),
        name: Set(u.name),
        email: Set(u.email),
        provider: Set(u.provider),
        provider_id: Set(u.provider_id),
        created_at: Set(u.created_at),
        updated_at: Set(u.updated_at),
    }
}

pub fn visit_to_active(v: NewVisit) -> visit::ActiveModel {
    visit::ActiveModel {
        id: Set(v.id),
        restaurant_id: Set(v.restaurant_id),
        user_id: Set(v.user_id),
        visited_at: Set(v.visited_at),
        rating: Set(v.rating),
        comment: Set(v.comment),
    }
}
