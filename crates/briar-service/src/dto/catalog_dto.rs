//! Catalog item DTOs.

use briar_core::domain::{
    Accessory, AccessoryKind, BlendType, ItemStatus, Pipe, PipeShape, Tobacco, TobaccoCut,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to create a pipe.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePipeRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 120, message = "Brand must be 1-120 characters"))]
    pub brand: String,

    pub shape: PipeShape,

    #[validate(length(min = 1, max = 60, message = "Material must be 1-60 characters"))]
    pub material: String,

    #[validate(length(max = 120))]
    pub finish: Option<String>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_cents: i64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    #[validate(length(max = 4000))]
    pub description: Option<String>,
}

impl CreatePipeRequest {
    /// Builds the entity; new items start hidden until activated.
    #[must_use]
    pub fn into_entity(self) -> Pipe {
        let mut pipe = Pipe::new(
            self.name,
            self.brand,
            self.shape,
            self.material,
            self.price_cents,
        );
        pipe.finish = self.finish;
        pipe.stock = self.stock.max(0);
        pipe.description = self.description;
        pipe
    }
}

/// Request to update a pipe. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePipeRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 120))]
    pub brand: Option<String>,

    pub shape: Option<PipeShape>,

    #[validate(length(min = 1, max = 60))]
    pub material: Option<String>,

    #[validate(length(max = 120))]
    pub finish: Option<String>,

    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,

    #[validate(range(min = 0))]
    pub stock: Option<i32>,

    #[validate(length(max = 4000))]
    pub description: Option<String>,
}

impl UpdatePipeRequest {
    /// Applies the present fields onto an existing entity.
    pub fn apply(self, pipe: &mut Pipe) {
        if let Some(name) = self.name {
            pipe.name = name;
        }
        if let Some(brand) = self.brand {
            pipe.brand = brand;
        }
        if let Some(shape) = self.shape {
            pipe.shape = shape;
        }
        if let Some(material) = self.material {
            pipe.material = material;
        }
        if let Some(finish) = self.finish {
            pipe.finish = Some(finish);
        }
        if let Some(price_cents) = self.price_cents {
            pipe.price_cents = price_cents.max(0);
        }
        if let Some(stock) = self.stock {
            pipe.stock = stock.max(0);
        }
        if let Some(description) = self.description {
            pipe.description = Some(description);
        }
        pipe.updated_at = Utc::now();
    }
}

/// Request to create a tobacco blend.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTobaccoRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 120, message = "Brand must be 1-120 characters"))]
    pub brand: String,

    pub blend_type: BlendType,
    pub cut: TobaccoCut,

    #[validate(range(min = 1, max = 5000, message = "Tin size must be 1-5000 grams"))]
    pub tin_size_grams: i32,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_cents: i64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    #[validate(length(max = 4000))]
    pub description: Option<String>,
}

impl CreateTobaccoRequest {
    #[must_use]
    pub fn into_entity(self) -> Tobacco {
        let mut tobacco = Tobacco::new(
            self.name,
            self.brand,
            self.blend_type,
            self.cut,
            self.tin_size_grams,
            self.price_cents,
        );
        tobacco.stock = self.stock.max(0);
        tobacco.description = self.description;
        tobacco
    }
}

/// Request to update a tobacco blend. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTobaccoRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 120))]
    pub brand: Option<String>,

    pub blend_type: Option<BlendType>,
    pub cut: Option<TobaccoCut>,

    #[validate(range(min = 1, max = 5000))]
    pub tin_size_grams: Option<i32>,

    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,

    #[validate(range(min = 0))]
    pub stock: Option<i32>,

    #[validate(length(max = 4000))]
    pub description: Option<String>,
}

impl UpdateTobaccoRequest {
    pub fn apply(self, tobacco: &mut Tobacco) {
        if let Some(name) = self.name {
            tobacco.name = name;
        }
        if let Some(brand) = self.brand {
            tobacco.brand = brand;
        }
        if let Some(blend_type) = self.blend_type {
            tobacco.blend_type = blend_type;
        }
        if let Some(cut) = self.cut {
            tobacco.cut = cut;
        }
        if let Some(tin_size_grams) = self.tin_size_grams {
            tobacco.tin_size_grams = tin_size_grams;
        }
        if let Some(price_cents) = self.price_cents {
            tobacco.price_cents = price_cents.max(0);
        }
        if let Some(stock) = self.stock {
            tobacco.stock = stock.max(0);
        }
        if let Some(description) = self.description {
            tobacco.description = Some(description);
        }
        tobacco.updated_at = Utc::now();
    }
}

/// Request to create an accessory.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAccessoryRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,

    pub kind: AccessoryKind,

    #[validate(length(max = 120))]
    pub brand: Option<String>,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price_cents: i64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i32,

    #[validate(length(max = 4000))]
    pub description: Option<String>,
}

impl CreateAccessoryRequest {
    #[must_use]
    pub fn into_entity(self) -> Accessory {
        let mut accessory = Accessory::new(self.name, self.kind, self.price_cents);
        accessory.brand = self.brand;
        accessory.stock = self.stock.max(0);
        accessory.description = self.description;
        accessory
    }
}

/// Request to update an accessory. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAccessoryRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,

    pub kind: Option<AccessoryKind>,

    #[validate(length(max = 120))]
    pub brand: Option<String>,

    #[validate(range(min = 0))]
    pub price_cents: Option<i64>,

    #[validate(range(min = 0))]
    pub stock: Option<i32>,

    #[validate(length(max = 4000))]
    pub description: Option<String>,
}

impl UpdateAccessoryRequest {
    pub fn apply(self, accessory: &mut Accessory) {
        if let Some(name) = self.name {
            accessory.name = name;
        }
        if let Some(kind) = self.kind {
            accessory.kind = kind;
        }
        if let Some(brand) = self.brand {
            accessory.brand = Some(brand);
        }
        if let Some(price_cents) = self.price_cents {
            accessory.price_cents = price_cents.max(0);
        }
        if let Some(stock) = self.stock {
            accessory.stock = stock.max(0);
        }
        if let Some(description) = self.description {
            accessory.description = Some(description);
        }
        accessory.updated_at = Utc::now();
    }
}

/// Request to change the visibility status of a catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStatusRequest {
    pub status: ItemStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_pipe_request_valid() {
        let request = CreatePipeRequest {
            name: "Lovat".to_string(),
            brand: "Dunhill".to_string(),
            shape: PipeShape::Billiard,
            material: "briar".to_string(),
            finish: Some("sandblast".to_string()),
            price_cents: 45_000,
            stock: 3,
            description: None,
        };
        assert!(request.validate().is_ok());

        let pipe = request.into_entity();
        assert_eq!(pipe.status, ItemStatus::Hidden);
        assert_eq!(pipe.stock, 3);
    }

    #[test]
    fn test_create_pipe_request_rejects_blank_name() {
        let request = CreatePipeRequest {
            name: String::new(),
            brand: "Dunhill".to_string(),
            shape: PipeShape::Billiard,
            material: "briar".to_string(),
            finish: None,
            price_cents: 100,
            stock: 0,
            description: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_tobacco_request_rejects_negative_price() {
        let request = CreateTobaccoRequest {
            name: "Nightcap".to_string(),
            brand: "Dunhill".to_string(),
            blend_type: BlendType::English,
            cut: TobaccoCut::Ribbon,
            tin_size_grams: 50,
            price_cents: -1,
            stock: 0,
            description: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let mut pipe = Pipe::new(
            "Lovat".to_string(),
            "Dunhill".to_string(),
            PipeShape::Billiard,
            "briar".to_string(),
            45_000,
        );
        let update = UpdatePipeRequest {
            price_cents: Some(39_000),
            ..Default::default()
        };
        update.apply(&mut pipe);
        assert_eq!(pipe.price_cents, 39_000);
        assert_eq!(pipe.name, "Lovat");
        assert_eq!(pipe.brand, "Dunhill");
    }
}
