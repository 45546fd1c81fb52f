use error_stack::Report;
use garde::Validate;
use serde::Deserialize;

use application::transfer::{
    CreateCustomerDto, DeleteCustomerDto, GetCustomerDto, UpdateCustomerDto,
};
use application::validation::validate;
use kernel::KernelError;

use crate::controller::TryIntake;
use crate::request::parse_path_id;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[garde(length(chars, min = 5, max = 50))]
    name: String,
    #[garde(length(chars, min = 5, max = 50))]
    phone: String,
    #[garde(skip)]
    #[serde(default)]
    is_gold: Option<bool>,
}

#[derive(Debug)]
pub struct GetCustomerRequest {
    id: String,
}

impl GetCustomerRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteCustomerRequest {
    id: String,
}

impl DeleteCustomerRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

pub struct CustomerTransformer;

impl TryIntake<CustomerRequest> for CustomerTransformer {
    type To = CreateCustomerDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: CustomerRequest) -> Result<Self::To, Self::Error> {
        validate(&input)?;
        Ok(CreateCustomerDto {
            name: input.name,
            phone: input.phone,
            is_gold: input.is_gold.unwrap_or_default(),
        })
    }
}

impl TryIntake<(String, CustomerRequest)> for CustomerTransformer {
    type To = UpdateCustomerDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: (String, CustomerRequest)) -> Result<Self::To, Self::Error> {
        let (id, input) = input;
        let id = parse_path_id(&id, "customer")?;
        validate(&input)?;
        Ok(UpdateCustomerDto {
            id,
            name: input.name,
            phone: input.phone,
            is_gold: input.is_gold.unwrap_or_default(),
        })
    }
}

impl TryIntake<GetCustomerRequest> for CustomerTransformer {
    type To = GetCustomerDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: GetCustomerRequest) -> Result<Self::To, Self::Error> {
        Ok(GetCustomerDto {
            id: parse_path_id(&input.id, "customer")?,
        })
    }
}

impl TryIntake<DeleteCustomerRequest> for CustomerTransformer {
    type To = DeleteCustomerDto;
    type Error = Report<KernelError>;
    fn emit(&self, input: DeleteCustomerRequest) -> Result<Self::To, Self::Error> {
        Ok(DeleteCustomerDto {
            id: parse_path_id(&input.id, "customer")?,
        })
    }
}

#[cfg(test)]
mod test {
    use kernel::KernelError;

    use crate::controller::TryIntake;
    use crate::request::{CustomerRequest, CustomerTransformer};

    fn request(name: &str) -> CustomerRequest {
        CustomerRequest {
            name: name.to_string(),
            phone: "12345".to_string(),
            is_gold: None,
        }
    }

    #[test]
    fn name_length_counts_characters() {
        // 31 characters, 59 bytes
        let name = "Дмитрий Иванович Петров-Сидоров";
        let dto = CustomerTransformer.emit(request(name)).expect("31 characters fit");
        assert_eq!(dto.name, name);
        assert!(!dto.is_gold);

        let longest = "я".repeat(50);
        assert!(CustomerTransformer.emit(request(&longest)).is_ok());

        let report = CustomerTransformer
            .emit(request(&"я".repeat(51)))
            .expect_err("51 characters");
        assert_eq!(report.current_context(), &KernelError::Validation);

        // 4 characters, 12 bytes
        let report = CustomerTransformer
            .emit(request("日本語名"))
            .expect_err("4 characters");
        assert_eq!(report.current_context(), &KernelError::Validation);
    }
}
