//! MFA enforcement policy.
//!
//! The document grants a user self-service management of their own MFA
//! device and password, and denies everything else unless the calling
//! session is MFA-authenticated. It is deterministic given only the
//! username; the username scopes the resource identifiers.

use serde_json::{json, Value};

/// Name of the inline policy attached to a user.
#[must_use]
pub fn policy_name(username: &str) -> String {
    format!("{username}-mfa-policy")
}

/// Builds the MFA enforcement policy document for a user.
#[must_use]
pub fn policy_document(username: &str) -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Sid": "AllowViewAccountInfo",
                "Effect": "Allow",
                "Action": [
                    "directory:GetAccountPasswordPolicy",
                    "directory:ListVirtualMfaDevices"
                ],
                "Resource": "*"
            },
            {
                "Sid": "AllowManageOwnPasswords",
                "Effect": "Allow",
                "Action": [
                    "directory:ChangePassword",
                    "directory:GetUser"
                ],
                "Resource": format!("arn:directory::*:user/{username}")
            },
            {
                "Sid": "AllowManageOwnMfa",
                "Effect": "Allow",
                "Action": [
                    "directory:CreateVirtualMfaDevice",
                    "directory:DeleteVirtualMfaDevice",
                    "directory:EnableMfaDevice",
                    "directory:ListMfaDevices",
                    "directory:ResyncMfaDevice"
                ],
                "Resource": [
                    format!("arn:directory::*:mfa/{username}"),
                    format!("arn:directory::*:user/{username}")
                ]
            },
            {
                "Sid": "DenyAllExceptUnlessSignedInWithMfa",
                "Effect": "Deny",
                "NotAction": [
                    "directory:CreateVirtualMfaDevice",
                    "directory:EnableMfaDevice",
                    "directory:GetUser",
                    "directory:ListMfaDevices",
                    "directory:ListVirtualMfaDevices",
                    "directory:ResyncMfaDevice",
                    "directory:GetSessionToken"
                ],
                "Resource": "*",
                "Condition": {
                    "BoolIfExists": {
                        "directory:MultiFactorAuthPresent": "false"
                    }
                }
            }
        ]
    })
}
