// Copyright (C) Microsoft Corporation. All rights reserved.

mod pkcs1_tests;

use super::*;
