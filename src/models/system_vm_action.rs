/// Lifecycle commands that can be issued against a system VM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemVmAction {
    Start,
    Stop,
    Reboot,
}

impl SystemVmAction {
    pub fn all() -> &'static [SystemVmAction] {
        &[Self::Start, Self::Stop, Self::Reboot]
    }

    /// Parse the URL slug used by the web console routes.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "start" => Some(Self::Start),
            "stop" => Some(Self::Stop),
            "reboot" => Some(Self::Reboot),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Reboot => "reboot",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Start => "Start System VM",
            Self::Stop => "Stop System VM",
            Self::Reboot => "Reboot System VM",
        }
    }

    pub fn api_command(&self) -> &'static str {
        match self {
            Self::Start => "startSystemVm",
            Self::Stop => "stopSystemVm",
            Self::Reboot => "rebootSystemVm",
        }
    }

    /// Key of the envelope that carries the job id in the submit response.
    pub fn async_job_response(&self) -> &'static str {
        match self {
            Self::Start => "startsystemvmresponse",
            Self::Stop => "stopsystemvmresponse",
            Self::Reboot => "rebootsystemvmresponse",
        }
    }

    pub fn in_process_text(&self) -> &'static str {
        match self {
            Self::Start => "Starting System VM....",
            Self::Stop => "Stopping System VM....",
            Self::Reboot => "Rebooting System VM....",
        }
    }

    pub fn confirm_message(&self) -> &'static str {
        match self {
            Self::Start => "Please confirm you want to start the system VM.",
            Self::Stop => "Please confirm you want to stop the system VM.",
            Self::Reboot => "Please confirm you want to reboot the system VM.",
        }
    }

    pub fn done_text(&self) -> &'static str {
        match self {
            Self::Start => "System VM started",
            Self::Stop => "System VM stopped",
            Self::Reboot => "System VM rebooted",
        }
    }

    /// The command as it appears on the wire, e.g. `command=startSystemVm&id=42`.
    pub fn command_query(&self, id: &str) -> String {
        format!("command={}&id={}", self.api_command(), urlencoding::encode(id))
    }
}

/// Outcome of the confirmation step shown before a lifecycle command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirm,
    Cancel,
}

impl Confirmation {
    /// Form value from the confirmation page; anything but `confirm` cancels.
    pub fn from_form(decision: &str) -> Self {
        if decision.trim().eq_ignore_ascii_case("confirm") {
            Self::Confirm
        } else {
            Self::Cancel
        }
    }

    /// Terminal answer; only an explicit yes confirms.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Self::Confirm,
            _ => Self::Cancel,
        }
    }
}
