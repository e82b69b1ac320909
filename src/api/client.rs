use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::types::{AppointmentsBody, DoctorsBody, MessageBody, PatientBody};
use super::{AdminCredentials, ApiError, EmailCredentials, Envelope, HospitalApi, LoginGrant};
use crate::config::PortalConfig;
use crate::models::{
    Appointment, AppointmentQuery, Doctor, FilterCriteria, NewDoctor, Patient, FILTER_ALL,
    NO_PATIENT_FILTER,
};

const SAVE_REJECTED: &str = "Failed to save doctor.";
const SAVE_UNREACHABLE: &str = "Network error or failed to save doctor.";
const SAVE_OK: &str = "Doctor successfully created.";
const DELETE_REJECTED: &str = "Failed to delete doctor on the server.";
const DELETE_UNREACHABLE: &str = "Network error or failed to connect to the server.";
const FILTER_REJECTED: &str = "Failed to filter doctors.";
const FILTER_UNREACHABLE: &str = "Failed to connect to the server.";
const APPOINTMENTS_FAILED: &str = "Failed to load appointments.";
const PATIENT_FAILED: &str = "Failed to load patient details.";

/// `reqwest`-backed client for the hospital REST backend.
pub struct RestClient {
    base_url: Url,
    client: reqwest::Client,
    timeout_secs: u64,
}

impl RestClient {
    /// Create a client rooted at `base_url` (trailing slash optional).
    pub fn new(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| ApiError::Http(e.to_string()))?;

        Ok(Self {
            base_url,
            client,
            timeout_secs: timeout.as_secs(),
        })
    }

    pub fn from_config(config: &PortalConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout,
            config.connect_timeout,
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append percent-encoded path segments to the base URL.
    ///
    /// `.` and `..` cannot be carried by a URL path; they are refused
    /// rather than silently dropped, which would shift later segments.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        if segments.iter().any(|s| is_dot_segment(s)) {
            return Err(ApiError::DotSegment);
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        // Token-bearing URLs must not reach the logs.
        let err = err.without_url();
        if err.is_connect() {
            ApiError::Connection(self.base_url.to_string())
        } else if err.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else {
            ApiError::Http(err.to_string())
        }
    }

    /// Send a request and decode a 2xx JSON body.
    ///
    /// Non-2xx answers become `ApiError::Rejected` with the `{message}` field
    /// when the body has one. An empty 2xx body decodes as `{}`.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<MessageBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let text = if body.trim().is_empty() { "{}" } else { body.as_str() };
        serde_json::from_str(text).map_err(|e| ApiError::ResponseParsing(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.execute(self.client.get(url)).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.execute(self.client.post(url).json(body)).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.execute(self.client.delete(url)).await
    }

    /// Fold a mutation result into an envelope with per-operation defaults.
    fn mutation_envelope(
        result: Result<MessageBody, ApiError>,
        ok: String,
        rejected: &str,
        unreachable: &str,
    ) -> Envelope<()> {
        match result {
            Ok(body) => Envelope::success_with_message((), body.message.unwrap_or(ok)),
            Err(e) => {
                let default = if e.is_transport() { unreachable } else { rejected };
                Envelope::failure(e.user_message(default))
            }
        }
    }
}

fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

/// Case-insensitive substring match, the backend's own name-filter rule.
fn contains_term(value: &str, term: &str) -> bool {
    value.to_lowercase().contains(&term.to_lowercase())
}

impl HospitalApi for RestClient {
    async fn get_doctors(&self) -> Vec<Doctor> {
        match self.get_json::<DoctorsBody>(&["doctor"]).await {
            Ok(body) => body.doctors,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching doctors");
                Vec::new()
            }
        }
    }

    async fn filter_doctors(&self, criteria: &FilterCriteria) -> Envelope<Vec<Doctor>> {
        let [name, time, specialty] = criteria.path_terms();
        // A dot-only name is fetched unfiltered and matched here.
        let (sent_name, local_name) = if is_dot_segment(name) {
            (FILTER_ALL, Some(name))
        } else {
            (name, None)
        };
        match self
            .get_json::<DoctorsBody>(&["doctor", "filter", sent_name, time, specialty])
            .await
        {
            Ok(mut body) => {
                if let Some(term) = local_name {
                    body.doctors.retain(|d| contains_term(&d.name, term));
                }
                Envelope::success(body.doctors)
            }
            Err(e) => {
                tracing::error!(error = %e, filter_name = name, filter_time = time, filter_specialty = specialty, "Error filtering doctors");
                let default = if e.is_transport() {
                    FILTER_UNREACHABLE
                } else {
                    FILTER_REJECTED
                };
                Envelope::failure(e.user_message(default))
            }
        }
    }

    async fn save_doctor(&self, doctor: &NewDoctor, token: &str) -> Envelope<()> {
        let result = self
            .post_json::<_, MessageBody>(&["doctor", "save", token], doctor)
            .await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "Error saving doctor");
        }
        Self::mutation_envelope(result, SAVE_OK.to_string(), SAVE_REJECTED, SAVE_UNREACHABLE)
    }

    async fn delete_doctor(&self, doctor_id: &str, token: &str) -> Envelope<()> {
        let result = self
            .delete_json::<MessageBody>(&["doctor", doctor_id, token])
            .await;
        if let Err(e) = &result {
            tracing::error!(error = %e, doctor_id, "Error deleting doctor");
        }
        Self::mutation_envelope(
            result,
            format!("Doctor {doctor_id} successfully deleted."),
            DELETE_REJECTED,
            DELETE_UNREACHABLE,
        )
    }

    async fn admin_login(&self, credentials: &AdminCredentials) -> Result<LoginGrant, ApiError> {
        self.post_json(&["admin"], credentials).await.inspect_err(|e| {
            tracing::warn!(error = %e, username = %credentials.username, "Admin login failed");
        })
    }

    async fn doctor_login(&self, credentials: &EmailCredentials) -> Result<LoginGrant, ApiError> {
        self.post_json(&["doctor", "login"], credentials)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Doctor login failed"))
    }

    async fn patient_login(&self, credentials: &EmailCredentials) -> Result<LoginGrant, ApiError> {
        self.post_json(&["patient", "login"], credentials)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Patient login failed"))
    }

    async fn get_patient_details(&self, patient_id: &str, token: &str) -> Envelope<Patient> {
        match self
            .get_json::<PatientBody>(&["patient", patient_id, token])
            .await
        {
            Ok(body) => Envelope::success(body.patient),
            Err(e) => {
                tracing::error!(error = %e, patient_id, "Error fetching patient details");
                Envelope::failure(e.user_message(PATIENT_FAILED))
            }
        }
    }

    async fn get_all_appointments(
        &self,
        query: &AppointmentQuery,
        token: &str,
    ) -> Envelope<Vec<Appointment>> {
        let [doctor_id, date, patient_name] = query.path_terms();
        let (sent_name, local_name) = if is_dot_segment(&patient_name) {
            (NO_PATIENT_FILTER, Some(patient_name.as_str()))
        } else {
            (patient_name.as_str(), None)
        };
        match self
            .get_json::<AppointmentsBody>(&[
                "appointments",
                doctor_id.as_str(),
                date.as_str(),
                sent_name,
                token,
            ])
            .await
        {
            Ok(mut body) => {
                if let Some(term) = local_name {
                    body.appointments.retain(|a| contains_term(&a.patient_name, term));
                }
                Envelope::success(body.appointments)
            }
            Err(e) => {
                tracing::error!(error = %e, doctor_id = %doctor_id, date = %date, "Error fetching appointments");
                Envelope::failure(e.user_message(APPOINTMENTS_FAILED))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeBackend;

    fn client_for(base: &str) -> RestClient {
        RestClient::new(base, Duration::from_secs(5), Duration::from_secs(2)).unwrap()
    }

    fn new_doctor(email: &str) -> NewDoctor {
        NewDoctor {
            name: "A".into(),
            email: email.into(),
            phone: "5551234567".into(),
            password: "secret1".into(),
            specialty: "cardiology".into(),
            available_times: vec!["09:00-10:00".into()],
        }
    }

    #[test]
    fn endpoint_appends_encoded_segments() {
        let client = client_for("http://localhost:8080/api/");
        let url = client.endpoint(&["doctor", "filter", "Dr Grey", "all", "a/b"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/doctor/filter/Dr%20Grey/all/a%2Fb"
        );
    }

    #[test]
    fn endpoint_refuses_dot_only_segments() {
        let client = client_for("http://localhost:8080/");
        for dots in [".", ".."] {
            let result = client.endpoint(&["doctor", "filter", dots, "all", "all"]);
            assert!(matches!(result, Err(ApiError::DotSegment)), "{dots}");
        }
        let url = client.endpoint(&["doctor", "filter", "...", "all", "all"]).unwrap();
        assert_eq!(url.path(), "/doctor/filter/.../all/all");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = RestClient::new("not a url", Duration::from_secs(1), Duration::from_secs(1));
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));

        let result = RestClient::new("mailto:x@y.z", Duration::from_secs(1), Duration::from_secs(1));
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn get_doctors_returns_empty_when_unreachable() {
        let client = client_for(crate::test_support::UNREACHABLE_BASE_URL);
        let doctors = client.get_doctors().await;
        assert!(doctors.is_empty());
    }

    #[tokio::test]
    async fn get_doctors_lists_backend_directory() {
        let backend = FakeBackend::start().await;
        let client = client_for(&backend.base_url);
        let doctors = client.get_doctors().await;
        assert_eq!(doctors.len(), 3);
        assert_eq!(doctors[0].name, "Dr. Meredith Grey");
    }

    #[tokio::test]
    async fn get_doctors_returns_empty_on_server_error() {
        let backend = FakeBackend::start().await;
        backend.fail_directory();
        let client = client_for(&backend.base_url);
        assert!(client.get_doctors().await.is_empty());
    }

    #[tokio::test]
    async fn blank_filter_requests_all_sentinels() {
        let backend = FakeBackend::start().await;
        let client = client_for(&backend.base_url);

        let result = client.filter_doctors(&FilterCriteria::new("", "", "")).await;
        let unfiltered = client.get_doctors().await;

        assert_eq!(result.data().unwrap(), &unfiltered);
        assert!(backend
            .requests()
            .contains(&("GET".to_string(), "/doctor/filter/all/all/all".to_string())));
    }

    #[tokio::test]
    async fn filter_by_specialty_narrows_results() {
        let backend = FakeBackend::start().await;
        let client = client_for(&backend.base_url);
        let result = client
            .filter_doctors(&FilterCriteria::new("", "", "neurology"))
            .await;
        let doctors = result.into_result().unwrap();
        assert_eq!(doctors.len(), 1);
        assert_eq!(doctors[0].specialization, "neurology");
    }

    #[tokio::test]
    async fn dot_only_name_is_matched_locally() {
        let backend = FakeBackend::start().await;
        let client = client_for(&backend.base_url);

        let dot = client.filter_doctors(&FilterCriteria::new(".", "", "")).await;
        let dots = client.filter_doctors(&FilterCriteria::new("..", "", "")).await;

        assert_eq!(dot.into_result().unwrap().len(), 3);
        assert!(dots.into_result().unwrap().is_empty());
        assert_eq!(
            backend.requests_with_method("GET"),
            vec!["/doctor/filter/all/all/all"; 2]
        );
    }

    #[tokio::test]
    async fn filter_rejection_carries_server_message() {
        let backend = FakeBackend::start().await;
        let client = client_for(&backend.base_url);
        let result = client.filter_doctors(&FilterCriteria::new("boom", "", "")).await;
        assert_eq!(result, Envelope::failure("filter exploded"));
    }

    #[tokio::test]
    async fn filter_unreachable_is_a_failure_envelope() {
        let client = client_for(crate::test_support::UNREACHABLE_BASE_URL);
        let result = client.filter_doctors(&FilterCriteria::default()).await;
        assert_eq!(result, Envelope::failure(FILTER_UNREACHABLE));
    }

    #[tokio::test]
    async fn save_doctor_400_surfaces_server_message() {
        let backend = FakeBackend::start().await;
        let client = client_for(&backend.base_url);
        let token = backend.admin_token();

        let result = client
            .save_doctor(&new_doctor("grey@clinic.test"), &token)
            .await;

        assert_eq!(result, Envelope::failure("email exists"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "email exists");
    }

    #[tokio::test]
    async fn save_doctor_puts_token_in_path() {
        let backend = FakeBackend::start().await;
        let client = client_for(&backend.base_url);
        let token = backend.admin_token();

        let result = client.save_doctor(&new_doctor("new@clinic.test"), &token).await;

        assert!(result.is_success());
        assert_eq!(result.message(), Some("Doctor added to db"));
        assert!(backend
            .requests()
            .contains(&("POST".to_string(), format!("/doctor/save/{token}"))));
        assert_eq!(backend.doctor_count(), 4);
    }

    #[tokio::test]
    async fn save_doctor_unreachable_uses_network_message() {
        let client = client_for(crate::test_support::UNREACHABLE_BASE_URL);
        let result = client.save_doctor(&new_doctor("x@clinic.test"), "tok123").await;
        assert_eq!(result, Envelope::failure(SAVE_UNREACHABLE));
    }

    #[tokio::test]
    async fn delete_doctor_sends_single_delete_with_id_and_token() {
        let backend = FakeBackend::start().await;
        let client = client_for(&backend.base_url);
        let token = backend.admin_token();

        let result = client.delete_doctor("2", &token).await;

        assert!(result.is_success());
        let deletes: Vec<_> = backend
            .requests()
            .into_iter()
            .filter(|(method, _)| method == "DELETE")
            .collect();
        assert_eq!(deletes, vec![("DELETE".to_string(), format!("/doctor/2/{token}"))]);
        assert_eq!(backend.doctor_count(), 2);
    }

    #[tokio::test]
    async fn delete_doctor_with_bad_token_fails() {
        let backend = FakeBackend::start().await;
        let client = client_for(&backend.base_url);
        let result = client.delete_doctor("2", "forged").await;
        assert_eq!(result, Envelope::failure("Invalid token"));
        assert_eq!(backend.doctor_count(), 3);
    }

    #[tokio::test]
    async fn admin_login_returns_token_or_rejection() {
        let backend = FakeBackend::start().await;
        let client = client_for(&backend.base_url);

        let grant = client
            .admin_login(&AdminCredentials {
                username: "admin".into(),
                password: "admin123".into(),
            })
            .await
            .unwrap();
        assert_eq!(grant.token, backend.admin_token());

        let err = client
            .admin_login(&AdminCredentials {
                username: "admin".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 401, .. }));
    }

    #[tokio::test]
    async fn doctor_login_returns_doctor_id() {
        let backend = FakeBackend::start().await;
        let client = client_for(&backend.base_url);
        let grant = client
            .doctor_login(&EmailCredentials {
                email: "grey@clinic.test".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();
        assert_eq!(grant.doctor_id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn patient_details_and_appointments() {
        let backend = FakeBackend::start().await;
        let client = client_for(&backend.base_url);

        let patient = client
            .get_patient_details("11", crate::test_support::PATIENT_TOKEN)
            .await
            .into_result()
            .unwrap();
        assert_eq!(patient.name, "Ana Lima");

        let query = AppointmentQuery {
            doctor_id: "1".into(),
            date: crate::test_support::appointment_day(),
            patient_name: None,
        };
        let appointments = client
            .get_all_appointments(&query, crate::test_support::DOCTOR_TOKEN)
            .await
            .into_result()
            .unwrap();
        assert_eq!(appointments.len(), 2);
    }

    #[tokio::test]
    async fn appointments_with_bad_token_fail() {
        let backend = FakeBackend::start().await;
        let client = client_for(&backend.base_url);
        let query = AppointmentQuery {
            doctor_id: "1".into(),
            date: crate::test_support::appointment_day(),
            patient_name: Some("Ana".into()),
        };
        let result = client.get_all_appointments(&query, "nope").await;
        assert!(!result.is_success());
    }
}
