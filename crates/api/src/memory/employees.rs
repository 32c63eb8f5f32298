use northwind_core::{
    Employee, EmployeeId, EmployeeService, Page, ReservedHeaderCodec, ServiceResult, allocator,
};

use super::{MemoryStore, WithBlob, row_count};

impl EmployeeService for MemoryStore {
    async fn list_employees(&self, page: Page) -> ServiceResult<Vec<Employee>> {
        let tables = self.tables.read().await;
        Ok(page
            .apply(tables.employees.values())
            .map(|entry| entry.record.clone())
            .collect())
    }

    async fn get_employee(&self, id: EmployeeId) -> ServiceResult<Option<Employee>> {
        let tables = self.tables.read().await;
        Ok(tables.employees.get(&id).map(|entry| entry.record.clone()))
    }

    async fn create_employee(&self, mut employee: Employee) -> ServiceResult<Option<EmployeeId>> {
        let mut tables = self.tables.write().await;
        let Some(id) = allocator::allocate(&tables.employees) else {
            tracing::warn!("employee id range exhausted");
            return Ok(None);
        };
        employee.id = id;
        tables.employees.insert(id, WithBlob::new(employee));
        Ok(Some(id))
    }

    async fn update_employee(&self, id: EmployeeId, employee: Employee) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(stored) = tables.employees.get_mut(&id) else {
            return Ok(false);
        };
        stored.record.overwrite_with(employee);
        Ok(true)
    }

    async fn delete_employee(&self, id: EmployeeId) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.employees.remove(&id).is_some())
    }

    async fn count_employees(&self) -> ServiceResult<u64> {
        let tables = self.tables.read().await;
        Ok(row_count(&tables.employees))
    }

    async fn get_employee_photo(&self, id: EmployeeId) -> ServiceResult<Option<Vec<u8>>> {
        let tables = self.tables.read().await;
        let Some(entry) = tables.employees.get(&id) else {
            return Ok(None);
        };
        let photo = ReservedHeaderCodec::decode(entry.blob.as_deref())?;
        Ok(Some(photo.to_vec()))
    }

    async fn update_employee_photo(&self, id: EmployeeId, photo: Vec<u8>) -> ServiceResult<bool> {
        let encoded = self.codec.encode(&photo)?;
        let mut tables = self.tables.write().await;
        let Some(entry) = tables.employees.get_mut(&id) else {
            return Ok(false);
        };
        entry.blob = Some(encoded);
        Ok(true)
    }

    async fn delete_employee_photo(&self, id: EmployeeId) -> ServiceResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(entry) = tables.employees.get_mut(&id) else {
            return Ok(false);
        };
        entry.blob = None;
        Ok(true)
    }
}
