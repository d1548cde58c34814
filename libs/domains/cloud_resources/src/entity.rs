use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub resource_type: String,
    pub region: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::customer_resource::Entity")]
    CustomerResource,
}

impl Related<crate::customer_resource::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CustomerResource.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::CloudResource {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            resource_type: model.resource_type,
            region: model.region,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
